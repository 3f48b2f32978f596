//! Key-value stores holding serialized transaction collections.
//!
//! Values are opaque strings keyed by a namespaced key, the same shape as
//! the mobile app's local storage:
//!   {"@gofinances:transactions_user:42": "[{\"id\":\"...\", ...}]"}

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Errors raised by a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be read or written, or did not answer in time.
    #[error("persistence unavailable for key {key}: {reason}")]
    Unavailable { key: String, reason: String },

    /// The stored value is not a JSON list of transaction records.
    #[error("stored value for key {key} is malformed: {reason}")]
    Malformed { key: String, reason: String },
}

impl StoreError {
    pub fn unavailable(key: &str, reason: impl ToString) -> Self {
        StoreError::Unavailable {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(key: &str, reason: impl ToString) -> Self {
        StoreError::Malformed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// An asynchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-memory store, used by tests and as a scratch store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value.
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.into(), value.into());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self
            .items
            .lock()
            .map_err(|_| StoreError::unavailable(key, "store lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StoreError::unavailable(key, "store lock poisoned"))?;
        items.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store backed by a single JSON object file.
///
/// A missing file reads as an empty store; writes replace the file through
/// a temporary sibling so readers never see a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::unavailable(
                    key,
                    format!("reading {}: {e}", self.path.display()),
                ));
            }
        };

        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text).map_err(|e| {
            StoreError::unavailable(key, format!("parsing {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut items = self.read_all(key).await?;
        tracing::debug!(path = %self.path.display(), key, "read store file");
        Ok(items.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut items = self.read_all(key).await?;
        items.insert(key.to_string(), value);

        let text = serde_json::to_string_pretty(&items)
            .map_err(|e| StoreError::unavailable(key, format!("serializing store: {e}")))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::unavailable(key, format!("creating {}: {e}", dir.display())))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| StoreError::unavailable(key, format!("writing {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::unavailable(key, format!("replacing {}: {e}", self.path.display())))?;

        tracing::debug!(path = %self.path.display(), key, "wrote store file");
        Ok(())
    }
}
