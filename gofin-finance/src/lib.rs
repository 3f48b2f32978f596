//! gofin-finance: transaction summaries, monthly category breakdowns and their locale formatting

pub mod breakdown;
pub mod dashboard;
pub mod format;
pub mod resume;
pub mod summary;

pub use breakdown::{CategoryAggregator, CategoryBreakdown, CategoryBucket};
pub use dashboard::{Dashboard, HighlightCard, Highlights, TransactionRow};
pub use format::Locale;
pub use resume::{CategoryRow, Resume};
pub use summary::{LastTransaction, NetPeriod, Summary, TransactionSummarizer};
