//! In-memory provider fakes for tests.
//!
//! Enabled for this crate's unit tests and, through the `test-support`
//! feature, for downstream integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shorts_models::AlignedWord;
use shorts_providers::{
    MediaSynthesizer, PromptStyle, ProviderError, ProviderResult, ScriptProvider, SpeechSynthesizer, WordAligner,
};

use crate::providers::Providers;

/// Script provider returning canned text and counting prompt requests.
#[derive(Debug)]
pub struct FakeScriptProvider {
    segment_calls: AtomicUsize,
    storyboard_reply: String,
    fail: bool,
    fail_segment_prompts: bool,
}

impl Default for FakeScriptProvider {
    fn default() -> Self {
        Self {
            segment_calls: AtomicUsize::new(0),
            storyboard_reply: r#"["scene 1", "scene 2", "scene 3", "scene 4", "scene 5"]"#.to_string(),
            fail: false,
            fail_segment_prompts: false,
        }
    }
}

impl FakeScriptProvider {
    pub fn with_storyboard_reply(mut self, reply: impl Into<String>) -> Self {
        self.storyboard_reply = reply.into();
        self
    }

    /// Every call fails with a request error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Only segment prompt generation fails.
    pub fn failing_segment_prompts() -> Self {
        Self {
            fail_segment_prompts: true,
            ..Self::default()
        }
    }

    pub fn segment_prompt_calls(&self) -> usize {
        self.segment_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> ProviderResult<()> {
        if self.fail {
            return Err(ProviderError::request_failed("fake script provider is down"));
        }
        Ok(())
    }
}

#[async_trait]
impl ScriptProvider for FakeScriptProvider {
    async fn generate_script(&self, topic: &str) -> ProviderResult<String> {
        self.check()?;
        Ok(format!("Did you know this about {}? It is fascinating.", topic))
    }

    async fn segment_prompt(&self, _script: &str) -> ProviderResult<String> {
        self.check()?;
        if self.fail_segment_prompts {
            return Err(ProviderError::empty_response("fake prompt model returned nothing"));
        }
        let n = self.segment_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("generated prompt {}", n))
    }

    async fn storyboard_prompts(&self, _script: &str, _topic: &str, _style: PromptStyle) -> ProviderResult<String> {
        self.check()?;
        Ok(self.storyboard_reply.clone())
    }
}

/// Speech synthesizer producing a fixed byte payload.
#[derive(Debug, Default)]
pub struct FakeSpeech {
    /// When set, only voices whose name contains the label resolve
    voices: Option<Vec<String>>,
}

impl FakeSpeech {
    pub fn with_voices(voices: &[&str]) -> Self {
        Self {
            voices: Some(voices.iter().map(|v| v.to_string()).collect()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, voice_name: &str) -> ProviderResult<Vec<u8>> {
        if let Some(voices) = &self.voices {
            if !voices.iter().any(|v| v.contains(voice_name)) {
                return Err(ProviderError::VoiceNotFound(voice_name.to_string()));
            }
        }
        let mut audio = b"RIFF".to_vec();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }
}

/// Word aligner returning a fixed word sequence (milliseconds).
#[derive(Debug)]
pub struct FakeAligner {
    words: Option<Vec<AlignedWord>>,
}

impl Default for FakeAligner {
    fn default() -> Self {
        Self {
            words: Some(vec![
                AlignedWord::new("Beba", 0, 320),
                AlignedWord::new("mais", 330, 610),
                AlignedWord::new("água.", 700, 1200),
                AlignedWord::new("Seu", 1500, 1720),
                AlignedWord::new("corpo", 1730, 2050),
                AlignedWord::new("agradece.", 2060, 2800),
            ]),
        }
    }
}

impl FakeAligner {
    /// Completes without producing a word sequence.
    pub fn without_words() -> Self {
        Self { words: None }
    }
}

#[async_trait]
impl WordAligner for FakeAligner {
    async fn align(&self, _audio: &[u8]) -> ProviderResult<Option<Vec<AlignedWord>>> {
        Ok(self.words.clone())
    }
}

#[derive(Debug, Default)]
struct MediaCalls {
    image_prompts: Vec<String>,
    reference_images: Vec<Option<String>>,
    animation_prompts: Vec<String>,
}

/// Media synthesizer with per-prompt delays and failures.
///
/// Calls are recorded when they complete, so the recorded order is the
/// completion order.
#[derive(Debug, Default)]
pub struct FakeMedia {
    fail_marker: Option<String>,
    animation_fail_marker: Option<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<MediaCalls>,
}

impl FakeMedia {
    /// Fail image generation for any prompt containing `marker`.
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    /// Fail animation for any prompt containing `marker`. The still is
    /// still produced.
    pub fn failing_animation_on(mut self, marker: impl Into<String>) -> Self {
        self.animation_fail_marker = Some(marker.into());
        self
    }

    /// Delay image generation for an exact prompt.
    pub fn with_delay(mut self, prompt: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(prompt.into(), delay);
        self
    }

    pub fn image_prompts(&self) -> Vec<String> {
        self.lock().image_prompts.clone()
    }

    pub fn reference_images(&self) -> Vec<Option<String>> {
        self.lock().reference_images.clone()
    }

    pub fn animation_prompts(&self) -> Vec<String> {
        self.lock().animation_prompts.clone()
    }

    pub fn animate_calls(&self) -> usize {
        self.lock().animation_prompts.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MediaCalls> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MediaSynthesizer for FakeMedia {
    async fn generate_image(&self, prompt: &str, reference_image: Option<&str>) -> ProviderResult<Vec<u8>> {
        if let Some(delay) = self.delays.get(prompt) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(marker) = &self.fail_marker {
            if prompt.contains(marker.as_str()) {
                return Err(ProviderError::PredictionFailed(format!("rejected prompt: {}", prompt)));
            }
        }

        let mut calls = self.lock();
        calls.image_prompts.push(prompt.to_string());
        calls.reference_images.push(reference_image.map(str::to_string));
        Ok(format!("PNG:{}", prompt).into_bytes())
    }

    async fn animate_image(&self, prompt: &str, first_frame: &[u8]) -> ProviderResult<Vec<u8>> {
        if let Some(marker) = &self.animation_fail_marker {
            if prompt.contains(marker.as_str()) {
                return Err(ProviderError::PredictionFailed(format!("animation rejected: {}", prompt)));
            }
        }
        self.lock().animation_prompts.push(prompt.to_string());
        let mut clip = b"MP4:".to_vec();
        clip.extend_from_slice(first_frame);
        Ok(clip)
    }
}

/// Providers wired entirely to default fakes.
pub fn fake_providers() -> Providers {
    Providers::new(
        Arc::new(FakeScriptProvider::default()),
        Arc::new(FakeSpeech::default()),
        Arc::new(FakeAligner::default()),
        Arc::new(FakeMedia::default()),
    )
}
