//! Application state.

use std::sync::Arc;

use shorts_pipeline::{AssetPipeline, PipelineConfig, Providers};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<AssetPipeline>,
}

impl AppState {
    pub fn new(config: ApiConfig, pipeline: AssetPipeline) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Create state with production provider clients.
    pub fn from_env(config: ApiConfig) -> anyhow::Result<Self> {
        let providers = Providers::from_env()?;
        let pipeline = AssetPipeline::new(providers, PipelineConfig::from_env());
        Ok(Self::new(config, pipeline))
    }

    pub fn pipeline_config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }
}
