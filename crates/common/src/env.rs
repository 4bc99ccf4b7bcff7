//! Environment/runtime helpers
//!
//! Sanity checks to ensure files configured at startup can be used.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of a data file exists so the first write
/// does not fail. The file itself is left alone.
pub async fn ensure_parent_dir(file: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = file.as_ref();
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        info!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

/// Fail early if a required input file is missing; warn when it is empty.
pub async fn require_file(file: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = file.as_ref();
    let meta = tokio::fs::metadata(file)
        .await
        .map_err(|e| anyhow::anyhow!("cannot access {}: {e}", file.display()))?;
    if !meta.is_file() {
        return Err(anyhow::anyhow!("{} is not a regular file", file.display()));
    }
    if meta.len() == 0 {
        warn!(file = %file.display(), "input file is empty");
    }
    Ok(())
}
