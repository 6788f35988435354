//! ElevenLabs text-to-speech client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ensure_success, ProviderError, ProviderResult};
use crate::traits::SpeechSynthesizer;

/// Configuration for the ElevenLabs client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key sent as `xi-api-key`
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Synthesis model
    pub model_id: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
        }
    }
}

impl ElevenLabsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("ELEVEN_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("ELEVEN_API_KEY not set; speech synthesis will fail");
        }

        Self {
            api_key,
            base_url: std::env::var("ELEVEN_BASE_URL").unwrap_or(defaults.base_url),
            model_id: std::env::var("ELEVEN_MODEL_ID").unwrap_or(defaults.model_id),
        }
    }
}

/// A voice as listed by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVoice {
    pub name: String,
    pub voice_id: String,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<ProviderVoice>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model_id: &'a str,
    text: &'a str,
}

/// ElevenLabs client.
pub struct ElevenLabsClient {
    http: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    /// Create a new client.
    pub fn new(config: ElevenLabsConfig) -> ProviderResult<Self> {
        let http = Client::builder().build().map_err(ProviderError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(ElevenLabsConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// List the voices available to this account.
    pub async fn list_voices(&self) -> ProviderResult<Vec<ProviderVoice>> {
        let response = self
            .http
            .get(self.url("/v1/voices"))
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await?;
        let response = ensure_success(response, "ElevenLabs").await?;

        let body: VoicesResponse = response.json().await?;
        Ok(body.voices)
    }

    /// Resolve a logical voice label to a provider voice id.
    ///
    /// Picks the first voice whose name contains `name`; provider names are
    /// often decorated (e.g. "Sarah - Soft News").
    pub async fn resolve_voice(&self, name: &str) -> ProviderResult<String> {
        let voices = self.list_voices().await?;
        voices
            .into_iter()
            .find(|v| v.name.contains(name))
            .map(|v| v.voice_id)
            .ok_or_else(|| ProviderError::VoiceNotFound(name.to_string()))
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_name: &str) -> ProviderResult<Vec<u8>> {
        let voice_id = self.resolve_voice(voice_name).await?;
        info!(voice = %voice_name, voice_id = %voice_id, "Synthesizing narration");

        let request = SpeechRequest {
            model_id: &self.config.model_id,
            text,
        };

        let response = self
            .http
            .post(self.url(&format!("/v1/text-to-speech/{}", voice_id)))
            .header("xi-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response, "ElevenLabs").await?;

        let audio = response.bytes().await?;
        debug!(bytes = audio.len(), "Received synthesized audio");
        Ok(audio.to_vec())
    }
}
