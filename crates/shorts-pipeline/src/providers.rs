//! The set of external services a pipeline run talks to.

use std::sync::Arc;

use shorts_providers::{
    AssemblyAiClient, ElevenLabsClient, MediaSynthesizer, OpenAiClient, ReplicateClient, ScriptProvider,
    SpeechSynthesizer, WordAligner,
};

use crate::error::{PipelineError, PipelineResult};

/// Provider clients, constructed once and shared by every job.
#[derive(Clone)]
pub struct Providers {
    pub script: Arc<dyn ScriptProvider>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub aligner: Arc<dyn WordAligner>,
    pub media: Arc<dyn MediaSynthesizer>,
}

impl Providers {
    pub fn new(
        script: Arc<dyn ScriptProvider>,
        speech: Arc<dyn SpeechSynthesizer>,
        aligner: Arc<dyn WordAligner>,
        media: Arc<dyn MediaSynthesizer>,
    ) -> Self {
        Self {
            script,
            speech,
            aligner,
            media,
        }
    }

    /// Build the production HTTP clients from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let script = OpenAiClient::from_env().map_err(PipelineError::config)?;
        let speech = ElevenLabsClient::from_env().map_err(PipelineError::config)?;
        let aligner = AssemblyAiClient::from_env().map_err(PipelineError::config)?;
        let media = ReplicateClient::from_env().map_err(PipelineError::config)?;

        Ok(Self::new(
            Arc::new(script),
            Arc::new(speech),
            Arc::new(aligner),
            Arc::new(media),
        ))
    }
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}
