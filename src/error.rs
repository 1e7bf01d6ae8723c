//! Error types for centavo.
//!
//! The command layer uses `anyhow` throughout; the ledger and storage layers
//! return the typed [`LedgerError`] so that callers can distinguish storage
//! failures from bad input.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// The errors that may occur in the ledger and storage layers.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A read from the key-value datastore failed.
    #[error("failed to read '{key}' from the datastore: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: Source,
    },

    /// A write to the key-value datastore failed.
    #[error("failed to write '{key}' to the datastore: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: Source,
    },

    /// The requested transaction id does not exist in the ledger.
    #[error("no transaction with id '{0}'")]
    NotFound(String),

    /// A transaction submission was rejected before reaching the store.
    #[error("invalid transaction: {0}")]
    Validation(String),

    /// The share facility is not available for exporting data.
    #[error("sharing is not available on this device")]
    ShareUnavailable,
}

impl LedgerError {
    pub(crate) fn storage_read(key: impl Into<String>, source: impl Into<Source>) -> Self {
        Self::StorageRead {
            key: key.into(),
            source: source.into(),
        }
    }

    pub(crate) fn storage_write(key: impl Into<String>, source: impl Into<Source>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source: source.into(),
        }
    }
}
