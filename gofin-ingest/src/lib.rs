//! gofin-ingest: key-value persistence and loading of a user's transaction collection.

pub mod repository;
pub mod store;

pub use repository::{LoadError, TransactionRepository, transactions_key};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
