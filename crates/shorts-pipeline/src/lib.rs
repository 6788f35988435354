//! Asset assembly pipeline.
//!
//! This crate provides:
//! - The orchestrator that drives one job from script to metadata document
//! - Positional prompt resolution and storyboard prompt parsing
//! - Concurrent per-segment media generation joined back in index order
//! - Metadata persistence (job copy plus the shared "latest" copy)
//! - Structured job logging and pipeline metrics

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod persistence;
pub mod prompts;
pub mod providers;
pub mod segments;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::JobLogger;
pub use orchestrator::AssetPipeline;
pub use providers::Providers;
