//! Writing generated files and the metadata document.

use std::path::{Path, PathBuf};

use shorts_models::{AssetNames, MetadataDocument};
use tokio::fs;
use tracing::debug;

use crate::config::PipelineConfig;

/// Write bytes to `path`, creating parent directories as needed.
pub async fn write_asset(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote asset");
    Ok(())
}

/// Where a job's metadata copies go.
#[derive(Debug, Clone)]
pub struct MetadataTargets {
    pub job_copy: PathBuf,
    pub latest_copy: PathBuf,
}

impl MetadataTargets {
    pub fn new(config: &PipelineConfig, names: &AssetNames) -> Self {
        Self {
            job_copy: config.output_dir.join(names.metadata()),
            latest_copy: config.latest_metadata_path.clone(),
        }
    }
}

/// Persist the document as pretty JSON to the job copy, then the shared
/// latest copy. The latest copy is overwritten without locking.
pub async fn persist_metadata(document: &MetadataDocument, targets: &MetadataTargets) -> std::io::Result<()> {
    let json = document
        .to_json_pretty()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    write_asset(&targets.job_copy, json.as_bytes()).await?;
    write_asset(&targets.latest_copy, json.as_bytes()).await?;
    Ok(())
}
