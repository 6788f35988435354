//! Capability interfaces consumed by the pipeline.
//!
//! Each trait covers one external service. Implementations are constructed
//! once at startup and shared behind `Arc<dyn ...>`, so tests can substitute
//! in-memory fakes.

use async_trait::async_trait;
use shorts_models::AlignedWord;

use crate::error::ProviderResult;

/// Flavor of a storyboard prompt batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Motion-focused prompts for image-to-video models
    Video,
    /// Photographic prompts for still image models
    Image,
}

impl PromptStyle {
    pub fn from_video_flag(use_video: bool) -> Self {
        if use_video {
            PromptStyle::Video
        } else {
            PromptStyle::Image
        }
    }
}

/// LLM text generation.
#[async_trait]
pub trait ScriptProvider: Send + Sync {
    /// Write a narration script about `topic`.
    async fn generate_script(&self, topic: &str) -> ProviderResult<String>;

    /// Derive a single-sentence background prompt from a script.
    ///
    /// Non-deterministic: repeated calls with the same script may differ.
    async fn segment_prompt(&self, script: &str) -> ProviderResult<String>;

    /// Ask for a batch of sequential scene prompts. Returns the raw model
    /// reply, which is expected (but not guaranteed) to be a JSON string array.
    async fn storyboard_prompts(&self, script: &str, topic: &str, style: PromptStyle) -> ProviderResult<String>;
}

/// Text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the voice whose name matches `voice_name`.
    async fn synthesize(&self, text: &str, voice_name: &str) -> ProviderResult<Vec<u8>>;
}

/// Speech-to-text word alignment.
#[async_trait]
pub trait WordAligner: Send + Sync {
    /// Align speech audio to words timed in milliseconds.
    ///
    /// `Ok(None)` means the service finished without a word sequence.
    async fn align(&self, audio: &[u8]) -> ProviderResult<Option<Vec<AlignedWord>>>;
}

/// Image and video generation.
#[async_trait]
pub trait MediaSynthesizer: Send + Sync {
    /// Generate a still image, optionally conditioned on a reference image URL.
    async fn generate_image(&self, prompt: &str, reference_image: Option<&str>) -> ProviderResult<Vec<u8>>;

    /// Animate a still image into a short clip.
    async fn animate_image(&self, prompt: &str, first_frame: &[u8]) -> ProviderResult<Vec<u8>>;
}
