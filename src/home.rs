use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// The `Home` object represents the file paths of the `$CENTAVO_HOME` directory and those paths
/// which are not configurable within `$CENTAVO_HOME`, such as the key-value data directory where
/// the ledger is persisted and the directory that exported files are written to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Home {
    root: PathBuf,
    data: PathBuf,
    exports: PathBuf,
}

impl Home {
    /// This will create the `centavo_home` directory, if it does not exist, and canonicalize
    /// itself. The `data` and `exports` subdirectories are created as well.
    pub async fn new(centavo_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = centavo_home.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create centavo home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let home = Self {
            root: root.clone(),
            data: root.join("data"),
            exports: root.join("exports"),
        };
        utils::make_dir(&home.data).await?;
        utils::make_dir(&home.exports).await?;
        Ok(home)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding one file per persisted key.
    pub fn data(&self) -> &Path {
        &self.data
    }

    /// The directory that exported JSON files are written to.
    pub fn exports(&self) -> &Path {
        &self.exports
    }
}

#[tokio::test]
async fn test_home() {
    use tempfile::TempDir;
    let dir = TempDir::new().unwrap();
    let home_dir = dir.path().to_owned();
    let home = Home::new(home_dir).await.unwrap();
    assert!(tokio::fs::read_dir(home.data()).await.is_ok());
    assert!(tokio::fs::read_dir(home.exports()).await.is_ok());
}
