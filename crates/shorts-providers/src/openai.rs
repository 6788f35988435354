//! OpenAI chat completions client for scripts and prompts.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ensure_success, ProviderError, ProviderResult};
use crate::prompts::{build_script_prompt, build_segment_prompt, build_storyboard_prompt};
use crate::traits::{PromptStyle, ScriptProvider};

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (bearer token)
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Chat model
    pub model: String,
    /// Language the narration script is written in
    pub script_language: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            script_language: "Portuguese (Brazil)".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("OPENAI_API_KEY not set; script and prompt generation will fail");
        }

        Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            script_language: std::env::var("SCRIPT_LANGUAGE").unwrap_or(defaults.script_language),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI chat completions client.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: OpenAiConfig) -> ProviderResult<Self> {
        let http = Client::builder().build().map_err(ProviderError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(OpenAiConfig::from_env())
    }

    /// Send a single user message and return the reply content.
    ///
    /// `Ok(None)` when the model returned no content.
    pub async fn complete(&self, prompt: &str, temperature: Option<f32>) -> ProviderResult<Option<String>> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response, "OpenAI").await?;

        let chat: ChatResponse = response.json().await?;
        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }

    async fn complete_required(&self, prompt: &str, temperature: Option<f32>) -> ProviderResult<String> {
        self.complete(prompt, temperature)
            .await?
            .ok_or_else(|| ProviderError::empty_response("OpenAI returned no text"))
    }
}

#[async_trait]
impl ScriptProvider for OpenAiClient {
    async fn generate_script(&self, topic: &str) -> ProviderResult<String> {
        info!(topic = %topic, "Generating narration script");
        let prompt = build_script_prompt(topic, &self.config.script_language);
        self.complete_required(&prompt, None).await
    }

    async fn segment_prompt(&self, script: &str) -> ProviderResult<String> {
        // High temperature keeps the five background prompts varied.
        self.complete_required(&build_segment_prompt(script), Some(1.0))
            .await
    }

    async fn storyboard_prompts(&self, script: &str, topic: &str, style: PromptStyle) -> ProviderResult<String> {
        let prompt = build_storyboard_prompt(script, topic, style);
        Ok(self
            .complete(&prompt, None)
            .await?
            .unwrap_or_else(|| "[]".to_string()))
    }
}
