//! Pipeline configuration.

use std::path::PathBuf;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory receiving audio, images, videos and job metadata
    pub output_dir: PathBuf,
    /// Shared metadata file read by the renderer (last writer wins)
    pub latest_metadata_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./public"),
            latest_metadata_path: PathBuf::from("./src/metadata.json"),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./public")),
            latest_metadata_path: std::env::var("LATEST_METADATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./src/metadata.json")),
        }
    }

    /// Where uploaded reference images are stored.
    pub fn uploads_dir(&self) -> PathBuf {
        self.output_dir.join("uploads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./public"));
        assert_eq!(config.latest_metadata_path, PathBuf::from("./src/metadata.json"));
        assert_eq!(config.uploads_dir(), PathBuf::from("./public/uploads"));
    }
}
