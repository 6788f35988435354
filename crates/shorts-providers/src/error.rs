//! Provider error types.

use reqwest::Response;
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn empty_response(msg: impl Into<String>) -> Self {
        Self::EmptyResponse(msg.into())
    }
}

/// Turn a non-2xx response into `RequestFailed` with the body attached.
pub(crate) async fn ensure_success(response: Response, service: &str) -> ProviderResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::RequestFailed(format!(
        "{} returned {}: {}",
        service, status, body
    )))
}
