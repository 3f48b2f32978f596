//! gofin-core: transaction records, validation, month selection and the category catalog

pub mod category;
pub mod error;
pub mod period;
pub mod time;
pub mod transaction;

pub use category::{CategoryCatalog, CategoryDef};
pub use error::{ValidationError, ValidationIssue};
pub use period::MonthYear;
pub use transaction::{MAX_AMOUNT, RawAmount, RawTransaction, Transaction, TransactionType, validate_all};
