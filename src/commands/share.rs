//! The export command.

use crate::args::ExportArgs;
use crate::commands::Out;
use crate::{export_transactions, FileShare, FileStore, Home, Ledger, Result};
use std::path::PathBuf;

/// Serialize the full ledger to an indented JSON file and hand it to the share sink.
pub async fn export(home: &Home, args: ExportArgs) -> Result<Out<PathBuf>> {
    let ledger = Ledger::load(FileStore::new(home)).await;
    let dir = args.out().unwrap_or_else(|| home.exports());
    let path = export_transactions(ledger.transactions(), dir, &FileShare).await?;
    Ok(Out::new(
        format!(
            "Exported {} transaction(s) to {}",
            ledger.transactions().len(),
            path.display()
        ),
        path,
    ))
}
