//! AssemblyAI client for word-level alignment of synthesized speech.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shorts_models::AlignedWord;
use tracing::{debug, info, warn};

use crate::error::{ensure_success, ProviderError, ProviderResult};
use crate::traits::WordAligner;

/// Configuration for the AssemblyAI client.
#[derive(Debug, Clone)]
pub struct AssemblyAiConfig {
    /// API key sent as `authorization`
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Spoken language of the narration
    pub language_code: String,
    /// Delay between transcript status checks
    pub poll_interval: Duration,
}

impl Default for AssemblyAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.assemblyai.com".to_string(),
            language_code: "pt".to_string(),
            poll_interval: Duration::from_millis(3000),
        }
    }
}

impl AssemblyAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("ASSEMBLYAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("ASSEMBLYAI_API_KEY not set; word alignment will fail");
        }

        Self {
            api_key,
            base_url: std::env::var("ASSEMBLYAI_BASE_URL").unwrap_or(defaults.base_url),
            language_code: std::env::var("TRANSCRIPT_LANGUAGE").unwrap_or(defaults.language_code),
            poll_interval: std::env::var("ASSEMBLYAI_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct Transcript {
    id: String,
    status: TranscriptStatus,
    #[serde(default)]
    words: Option<Vec<TranscriptWord>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptWord {
    text: String,
    start: u64,
    end: u64,
}

/// AssemblyAI client.
pub struct AssemblyAiClient {
    http: Client,
    config: AssemblyAiConfig,
}

impl AssemblyAiClient {
    /// Create a new client.
    pub fn new(config: AssemblyAiConfig) -> ProviderResult<Self> {
        let http = Client::builder().build().map_err(ProviderError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(AssemblyAiConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn upload(&self, audio: &[u8]) -> ProviderResult<String> {
        let response = self
            .http
            .post(self.url("/v2/upload"))
            .header("authorization", &self.config.api_key)
            .body(audio.to_vec())
            .send()
            .await?;
        let response = ensure_success(response, "AssemblyAI").await?;

        let upload: UploadResponse = response.json().await?;
        Ok(upload.upload_url)
    }

    async fn submit(&self, audio_url: &str) -> ProviderResult<Transcript> {
        let request = TranscriptRequest {
            audio_url,
            language_code: &self.config.language_code,
        };

        let response = self
            .http
            .post(self.url("/v2/transcript"))
            .header("authorization", &self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response, "AssemblyAI").await?;
        Ok(response.json().await?)
    }

    async fn fetch(&self, id: &str) -> ProviderResult<Transcript> {
        let response = self
            .http
            .get(self.url(&format!("/v2/transcript/{}", id)))
            .header("authorization", &self.config.api_key)
            .send()
            .await?;
        let response = ensure_success(response, "AssemblyAI").await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WordAligner for AssemblyAiClient {
    async fn align(&self, audio: &[u8]) -> ProviderResult<Option<Vec<AlignedWord>>> {
        let audio_url = self.upload(audio).await?;
        info!(bytes = audio.len(), "Uploaded narration for alignment");

        let mut transcript = self.submit(&audio_url).await?;

        // Polls until the service reaches a terminal state; there is no deadline.
        loop {
            match transcript.status {
                TranscriptStatus::Completed => break,
                TranscriptStatus::Error => {
                    return Err(ProviderError::request_failed(format!(
                        "Transcription {} failed: {}",
                        transcript.id,
                        transcript.error.unwrap_or_default()
                    )));
                }
                TranscriptStatus::Queued | TranscriptStatus::Processing | TranscriptStatus::Unknown => {
                    debug!(transcript_id = %transcript.id, status = ?transcript.status, "Waiting for transcript");
                    tokio::time::sleep(self.config.poll_interval).await;
                    transcript = self.fetch(&transcript.id).await?;
                }
            }
        }

        Ok(transcript.words.map(|words| {
            words
                .into_iter()
                .map(|w| AlignedWord::new(w.text, w.start, w.end))
                .collect()
        }))
    }
}
