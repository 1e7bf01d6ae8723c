//! One-way export of the ledger to a shareable JSON file.
//!
//! The full collection is serialized to indented JSON and handed to a share sink. There is no
//! import or reconciliation path; the export is a snapshot for the user to do with as they
//! please.

use crate::model::Transaction;
use crate::LedgerError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// The file name that exports are written under.
pub const EXPORT_FILE_NAME: &str = "expense_tracker_data.json";

/// A facility that can receive an exported file, mirroring a platform share sheet.
#[async_trait]
pub trait ShareSink: Send + Sync {
    /// Whether sharing is possible at all on this device.
    fn is_available(&self) -> bool;

    /// Writes `contents` to `path`.
    async fn write(&self, path: &Path, contents: &str) -> Result<(), LedgerError>;

    /// Hands the written file off to the user.
    async fn share(&self, path: &Path) -> Result<(), LedgerError>;
}

/// The default sink: writes the file to disk and tells the user where it is.
#[derive(Debug, Clone, Default)]
pub struct FileShare;

#[async_trait]
impl ShareSink for FileShare {
    fn is_available(&self) -> bool {
        true
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), LedgerError> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| LedgerError::storage_write(path.to_string_lossy(), e))
    }

    async fn share(&self, path: &Path) -> Result<(), LedgerError> {
        info!("Exported data is ready at {}", path.display());
        Ok(())
    }
}

/// Serializes `transactions` to indented JSON and shares the file through `sink`, returning
/// the path that was written. Fails with `ShareUnavailable` if the sink cannot share.
pub async fn export_transactions(
    transactions: &[Transaction],
    dir: &Path,
    sink: &impl ShareSink,
) -> Result<PathBuf, LedgerError> {
    if !sink.is_available() {
        return Err(LedgerError::ShareUnavailable);
    }

    let json = serde_json::to_string_pretty(transactions)
        .map_err(|e| LedgerError::storage_write(EXPORT_FILE_NAME, e))?;
    let path = dir.join(EXPORT_FILE_NAME);
    sink.write(&path, &json).await?;
    sink.share(&path).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, NewTransaction, TransactionKind};
    use chrono::DateTime;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn transactions() -> Vec<Transaction> {
        vec![Transaction::new(
            "abc".to_string(),
            NewTransaction {
                amount: Amount::from_str("40").unwrap(),
                category: "Food".to_string(),
                date: DateTime::parse_from_rfc3339("2024-01-10T00:00:00Z").unwrap(),
                kind: TransactionKind::Expense,
                description: Some("lunch".to_string()),
            },
        )]
    }

    #[tokio::test]
    async fn test_export_writes_indented_json() {
        let dir = TempDir::new().unwrap();
        let original = transactions();

        let path = export_transactions(&original, dir.path(), &FileShare)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        // Pretty-printed, and a faithful copy of the collection.
        assert!(contents.contains('\n'));
        let parsed: Vec<Transaction> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, original);
    }

    struct UnavailableSink;

    #[async_trait]
    impl ShareSink for UnavailableSink {
        fn is_available(&self) -> bool {
            false
        }

        async fn write(&self, _path: &Path, _contents: &str) -> Result<(), LedgerError> {
            panic!("write must not be called when sharing is unavailable");
        }

        async fn share(&self, _path: &Path) -> Result<(), LedgerError> {
            panic!("share must not be called when sharing is unavailable");
        }
    }

    #[tokio::test]
    async fn test_export_fails_when_sharing_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = export_transactions(&transactions(), dir.path(), &UnavailableSink)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ShareUnavailable));
    }
}
