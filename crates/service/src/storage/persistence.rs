use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::StoreError;

/// Where a `PersDict` keeps its serialized map.
/// Implementations can be file-backed or purely in memory for tests.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Current contents, or `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
    /// Replace the contents in full.
    async fn save(&self, bytes: &[u8]) -> Result<(), StoreError>;
    /// Human-readable location for logs and error messages.
    fn describe(&self) -> String;
}

/// A JSON file on disk.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write never leaves a truncated store behind.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Persistence for JsonFile {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(format!("{}: {e}", self.path.display()))),
        }
    }

    async fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Persistence(format!("{}: {e}", parent.display())))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::Persistence(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Persistence(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
