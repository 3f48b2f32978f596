//! Load and append a user's transaction collection.
//!
//! The whole collection lives under one key per user and is read in full;
//! there is no pagination or incremental update.

use std::time::Duration;

use chrono_tz::Tz;
use gofin_core::{RawTransaction, Transaction, ValidationError, validate_all};

use crate::store::{KeyValueStore, StoreError};

/// Namespace prefix shared with the mobile app.
pub const KEY_PREFIX: &str = "@gofinances:transactions_user:";

/// Default bound on a single store read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Storage key for a user's transactions.
pub fn transactions_key(user_id: &str) -> String {
    format!("{KEY_PREFIX}{user_id}")
}

/// Anything that stops a collection from loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Reads and writes the transaction collection of a user.
pub struct TransactionRepository<S> {
    store: S,
    read_timeout: Duration,
}

impl<S: KeyValueStore> TransactionRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the raw records, unvalidated.
    ///
    /// An absent or blank value is an empty collection, not an error.
    pub async fn load_raw(&self, user_id: &str) -> Result<Vec<RawTransaction>, StoreError> {
        let key = transactions_key(user_id);

        let value = tokio::time::timeout(self.read_timeout, self.store.get_item(&key))
            .await
            .map_err(|_| {
                StoreError::unavailable(&key, format!("read timed out after {:?}", self.read_timeout))
            })??;

        let Some(text) = value.filter(|v| !v.trim().is_empty()) else {
            tracing::debug!(key = %key, "no stored transactions");
            return Ok(Vec::new());
        };

        let records: Vec<RawTransaction> =
            serde_json::from_str(&text).map_err(|e| StoreError::malformed(&key, e))?;
        tracing::debug!(key = %key, count = records.len(), "loaded transaction records");
        Ok(records)
    }

    /// Read and validate the collection, resolving dates in `tz`.
    pub async fn load(&self, user_id: &str, tz: Tz) -> Result<Vec<Transaction>, LoadError> {
        let records = self.load_raw(user_id).await?;
        Ok(validate_all(&records, tz)?)
    }

    /// Append one record and write the whole collection back.
    ///
    /// The record is validated first so a bad record never reaches storage.
    pub async fn append(&self, user_id: &str, record: RawTransaction, tz: Tz) -> Result<(), LoadError> {
        record.validate(tz)?;

        let key = transactions_key(user_id);
        let mut records = self.load_raw(user_id).await?;
        records.push(record);

        let text = serde_json::to_string(&records).map_err(|e| StoreError::malformed(&key, e))?;
        self.store.set_item(&key, text).await?;
        tracing::info!(key = %key, count = records.len(), "stored transaction");
        Ok(())
    }
}
