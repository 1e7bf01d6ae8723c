//! The key-value datastore that the ledger and settings synchronize to.
//!
//! Every persisted value is a string held under a fixed key. [`FileStore`] keeps one file per
//! key under the home data directory. [`MemoryStore`] backs the same trait with a `HashMap` and
//! exists so that the ledger can be exercised without touching the filesystem.

use crate::{Home, LedgerError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// An async key-value storage facility.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key has never been set.
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), LedgerError>;

    /// Removes `key`. Removing a key that does not exist is not an error.
    async fn remove(&self, key: &str) -> Result<(), LedgerError>;

    /// Removes every key in the store.
    async fn clear(&self) -> Result<(), LedgerError>;
}

/// A [`KeyValueStore`] holding each key as a `.json` file in a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(home: &Home) -> Self {
        Self {
            dir: home.data().to_path_buf(),
        }
    }

    /// Creates a store rooted at an arbitrary directory. The directory must already exist.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        let path = self.path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::storage_read(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        tokio::fs::write(self.path(key), value)
            .await
            .map_err(|e| LedgerError::storage_write(key, e))
    }

    async fn remove(&self, key: &str) -> Result<(), LedgerError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LedgerError::storage_write(key, e)),
        }
    }

    async fn clear(&self) -> Result<(), LedgerError> {
        let mut dir = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| LedgerError::storage_write("*", e))?;
        loop {
            let entry = dir
                .next_entry()
                .await
                .map_err(|e| LedgerError::storage_write("*", e))?;
            let Some(entry) = entry else {
                return Ok(());
            };
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                tokio::fs::remove_file(entry.path())
                    .await
                    .map_err(|e| LedgerError::storage_write("*", e))?;
            }
        }
    }
}

/// A [`KeyValueStore`] backed by a `HashMap`, used in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        let _ = self
            .values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LedgerError> {
        let _ = self.values.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), LedgerError> {
        self.values.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(dir.path());

        assert_eq!(store.get("currency").await.unwrap(), None);
        store.set("currency", "USD").await.unwrap();
        assert_eq!(
            store.get("currency").await.unwrap(),
            Some("USD".to_string())
        );

        store.set("currency", "COP").await.unwrap();
        assert_eq!(
            store.get("currency").await.unwrap(),
            Some("COP".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(dir.path());

        store.set("transactions", "[]").await.unwrap();
        store.remove("transactions").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap(), None);

        // Removing again must not error.
        store.remove("transactions").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::with_dir(dir.path());

        store.set("transactions", "[]").await.unwrap();
        store.set("currency", "USD").await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.get("transactions").await.unwrap(), None);
        assert_eq!(store.get("currency").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("dark_mode", "true").await.unwrap();
        assert_eq!(
            store.get("dark_mode").await.unwrap(),
            Some("true".to_string())
        );
        store.clear().await.unwrap();
        assert_eq!(store.get("dark_mode").await.unwrap(), None);
    }
}
