//! Structured job logging.
//!
//! Every pipeline event carries the job id and operation so one job's
//! narration, alignment and segment work can be filtered out of a shared log.

use std::time::Duration;

use shorts_models::{CaptionPlan, JobId, MediaMode};
use tracing::{error, info, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber: JSON when `LOG_FORMAT=json`, ANSI otherwise.
pub fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("shorts=info".parse()?)
        .add_directive("hyper=warn".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .try_init()?;
    }
    Ok(())
}

/// Job logger for structured logging with consistent fields.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job_id: String,
    operation: String,
}

impl JobLogger {
    /// Create a logger for a job and operation (e.g. "asset_pipeline").
    pub fn new(job_id: &JobId, operation: &str) -> Self {
        Self::from_string(job_id.as_str(), operation)
    }

    pub fn from_string(job_id: &str, operation: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, voice: &str, mode: MediaMode, script_chars: usize) {
        info!(
            job_id = %self.job_id,
            operation = %self.operation,
            voice = %voice,
            mode = %mode,
            script_chars,
            "Job started"
        );
    }

    /// Log a finished stage with its wall time.
    pub fn log_stage(&self, stage: &str, elapsed: Duration) {
        info!(
            job_id = %self.job_id,
            operation = %self.operation,
            stage = %stage,
            elapsed_ms = elapsed.as_millis() as u64,
            "Stage finished"
        );
    }

    pub fn log_segment(&self, index: usize, media: &str) {
        info!(
            job_id = %self.job_id,
            operation = %self.operation,
            segment = index,
            media = %media,
            "Segment ready"
        );
    }

    pub fn log_segment_failure(&self, index: usize, message: &str) {
        error!(
            job_id = %self.job_id,
            operation = %self.operation,
            segment = index,
            "Segment failed: {}", message
        );
    }

    /// Summarize how the words will be batched on screen.
    pub fn log_captions(&self, plan: &CaptionPlan<'_>, scene_seconds: Option<f64>) {
        info!(
            job_id = %self.job_id,
            operation = %self.operation,
            caption_batches = plan.len(),
            scene_seconds = scene_seconds.unwrap_or(0.0),
            "Caption plan ready"
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            job_id = %self.job_id,
            operation = %self.operation,
            "Job error: {}", message
        );
    }

    pub fn log_completion(&self, segments: usize, words: usize, elapsed: Duration) {
        info!(
            job_id = %self.job_id,
            operation = %self.operation,
            segments,
            words,
            elapsed_ms = elapsed.as_millis() as u64,
            "Job completed"
        );
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Span that scopes all events emitted while the job runs.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "job",
            job_id = %self.job_id,
            operation = %self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_logger_creation() {
        let job_id = JobId::new();
        let logger = JobLogger::new(&job_id, "asset_pipeline");

        assert_eq!(logger.job_id(), job_id.as_str());
        assert_eq!(logger.operation(), "asset_pipeline");
    }

    #[test]
    fn test_job_logger_from_string() {
        let logger = JobLogger::from_string("job-123", "storyboard");

        assert_eq!(logger.job_id(), "job-123");
        assert_eq!(logger.operation(), "storyboard");
    }
}
