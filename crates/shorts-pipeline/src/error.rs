//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Script generation failed: {0}")]
    ScriptGeneration(String),

    #[error("Audio synthesis failed: {0}")]
    AudioSynthesis(String),

    #[error("Word alignment failed: {0}")]
    Alignment(String),

    #[error("Segment {index} generation failed: {message}")]
    SegmentGeneration { index: usize, message: String },

    #[error("Could not parse prompt list: {0}")]
    PromptParse(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn script_generation(msg: impl ToString) -> Self {
        Self::ScriptGeneration(msg.to_string())
    }

    pub fn audio_synthesis(msg: impl ToString) -> Self {
        Self::AudioSynthesis(msg.to_string())
    }

    pub fn alignment(msg: impl ToString) -> Self {
        Self::Alignment(msg.to_string())
    }

    pub fn segment(index: usize, msg: impl ToString) -> Self {
        Self::SegmentGeneration {
            index,
            message: msg.to_string(),
        }
    }

    pub fn persistence(msg: impl ToString) -> Self {
        Self::Persistence(msg.to_string())
    }

    pub fn invalid_input(msg: impl ToString) -> Self {
        Self::InvalidInput(msg.to_string())
    }

    pub fn config(msg: impl ToString) -> Self {
        Self::Config(msg.to_string())
    }

    /// Pipeline stage the error belongs to, used as a metric label.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::ScriptGeneration(_) => "script",
            PipelineError::AudioSynthesis(_) => "audio",
            PipelineError::Alignment(_) => "alignment",
            PipelineError::SegmentGeneration { .. } => "segment",
            PipelineError::PromptParse(_) => "prompts",
            PipelineError::Persistence(_) => "persistence",
            PipelineError::InvalidInput(_) => "input",
            PipelineError::Config(_) => "config",
        }
    }

    /// Check if the caller sent something unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }

    /// Index of the failing segment, if this is a segment failure.
    pub fn segment_index(&self) -> Option<usize> {
        match self {
            PipelineError::SegmentGeneration { index, .. } => Some(*index),
            _ => None,
        }
    }
}
