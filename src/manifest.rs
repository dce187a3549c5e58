//! # Manifest Module
//!
//! Reads and writes the JSON manifest that joins the crawler to the
//! downstream content generators. The manifest is an ordered list of
//! [`PaintingRecord`]s, pretty-printed UTF-8 with non-ASCII characters
//! preserved literally, and is rewritten wholesale on every successful run.
//!
//! Consumers load it through [`load_manifest`], which refuses with an
//! instructive error when no crawl has produced a manifest yet.

use std::io;
use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::crawler::PaintingRecord;

/// Error type for manifest operations
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest not found at {0}; run the crawl first")]
    NotFound(String),
}

impl From<ManifestError> for crate::Error {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::Io(e) => crate::Error::Io(e),
            ManifestError::Json(e) => crate::Error::Json(e),
            other => crate::Error::Manifest(other.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, ManifestError>;

/// Write the manifest, replacing any previous version.
///
/// Records are serialized in their given order; missing parent directories
/// are created.
pub async fn write_manifest(path: &Path, records: &[PaintingRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).await?;

    info!(path = %path.display(), count = records.len(), "wrote manifest");
    Ok(())
}

/// Load a previously written manifest.
///
/// A missing file is a fatal precondition for downstream consumers and maps
/// to [`ManifestError::NotFound`] with the instruction to run the crawl.
pub async fn load_manifest(path: &Path) -> Result<Vec<PaintingRecord>> {
    if !fs::try_exists(path).await? {
        return Err(ManifestError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).await?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}
