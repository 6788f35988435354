//! Replicate client for still images and image-to-video animation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{ensure_success, ProviderError, ProviderResult};
use crate::traits::MediaSynthesizer;

const NEGATIVE_PROMPT: &str = "nude, naked, nsfw, text, watermark, bad anatomy, bad hands, blurry, low quality";
const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 1792;
const REFERENCE_IMAGE_STRENGTH: f64 = 0.35;

/// A model identifier of the form `owner/name` or `owner/name:version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl ModelRef {
    pub fn parse(s: &str) -> ProviderResult<Self> {
        let (path, version) = match s.split_once(':') {
            Some((path, version)) if !version.is_empty() => (path, Some(version.to_string())),
            Some(_) => return Err(ProviderError::Config(format!("Empty model version in '{}'", s))),
            None => (s, None),
        };

        match path.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
                version,
            }),
            _ => Err(ProviderError::Config(format!(
                "Model must look like owner/name[:version], got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

/// Configuration for the Replicate client.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// API token (bearer)
    pub api_token: String,
    /// Base URL of the API
    pub base_url: String,
    /// Text/image-to-image model
    pub image_model: String,
    /// Image-to-video model
    pub video_model: String,
    /// Delay between prediction status checks
    pub poll_interval: Duration,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: "https://api.replicate.com".to_string(),
            image_model: "bytedance/seedream-4:cf7d431991436f19d1c8dad83fe463c729c816d7a21056c5105e75c84a0aa7e9"
                .to_string(),
            video_model: "minimax/video-01".to_string(),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl ReplicateConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_token = std::env::var("REPLICATE_API_TOKEN").unwrap_or_default();
        if api_token.is_empty() {
            warn!("REPLICATE_API_TOKEN not set; media generation will fail");
        }

        Self {
            api_token,
            base_url: std::env::var("REPLICATE_BASE_URL").unwrap_or(defaults.base_url),
            image_model: std::env::var("REPLICATE_IMAGE_MODEL").unwrap_or(defaults.image_model),
            video_model: std::env::var("REPLICATE_VIDEO_MODEL").unwrap_or(defaults.video_model),
            poll_interval: std::env::var("REPLICATE_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    latest_version: Option<ModelVersion>,
}

#[derive(Debug, Deserialize)]
struct ModelVersion {
    id: String,
}

/// Replicate client.
pub struct ReplicateClient {
    http: Client,
    config: ReplicateConfig,
    image_model: ModelRef,
    video_model: ModelRef,
}

impl ReplicateClient {
    /// Create a new client. Fails if a configured model id is malformed.
    pub fn new(config: ReplicateConfig) -> ProviderResult<Self> {
        let http = Client::builder().build().map_err(ProviderError::Network)?;
        let image_model = ModelRef::parse(&config.image_model)?;
        let video_model = ModelRef::parse(&config.video_model)?;
        Ok(Self {
            http,
            config,
            image_model,
            video_model,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(ReplicateConfig::from_env())
    }

    pub fn image_model(&self) -> &ModelRef {
        &self.image_model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Latest published version id of a model.
    pub async fn latest_version(&self, model: &ModelRef) -> ProviderResult<Option<String>> {
        let response = self
            .http
            .get(self.url(&format!("/v1/models/{}/{}", model.owner, model.name)))
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;
        let response = ensure_success(response, "Replicate").await?;

        let info: ModelInfo = response.json().await?;
        Ok(info.latest_version.map(|v| v.id))
    }

    /// Run a model to completion and return the URL of its first output.
    pub async fn run(&self, model: &ModelRef, input: Value) -> ProviderResult<String> {
        let request = match &model.version {
            Some(version) => self
                .http
                .post(self.url("/v1/predictions"))
                .json(&json!({ "version": version, "input": input })),
            None => self
                .http
                .post(self.url(&format!("/v1/models/{}/{}/predictions", model.owner, model.name)))
                .json(&json!({ "input": input })),
        };

        let response = request.bearer_auth(&self.config.api_token).send().await?;
        let response = ensure_success(response, "Replicate").await?;
        let mut prediction: Prediction = response.json().await?;
        debug!(model = %model, prediction_id = %prediction.id, "Prediction created");

        // Polls until the prediction reaches a terminal state; there is no deadline.
        loop {
            match prediction.status.as_str() {
                "succeeded" => break,
                "failed" | "canceled" => {
                    let reason = prediction
                        .error
                        .map(|e| match e {
                            Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .unwrap_or_else(|| prediction.status.clone());
                    return Err(ProviderError::PredictionFailed(format!(
                        "{} prediction {}: {}",
                        model, prediction.id, reason
                    )));
                }
                _ => {
                    tokio::time::sleep(self.config.poll_interval).await;
                    prediction = self.fetch_prediction(&prediction.id).await?;
                }
            }
        }

        output_url(&prediction.output)
            .ok_or_else(|| ProviderError::empty_response(format!("No output from {}", model)))
    }

    async fn fetch_prediction(&self, id: &str) -> ProviderResult<Prediction> {
        let response = self
            .http
            .get(self.url(&format!("/v1/predictions/{}", id)))
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;
        let response = ensure_success(response, "Replicate").await?;
        Ok(response.json().await?)
    }

    /// Download a generated file.
    pub async fn download(&self, url: &str) -> ProviderResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let response = ensure_success(response, "Replicate delivery").await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// First URL of a prediction output: either a list of URLs or a single one.
fn output_url(output: &Value) -> Option<String> {
    match output {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items.first().and_then(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}

/// Build the input for a still image.
pub fn image_input(prompt: &str, reference_image: Option<&str>) -> Value {
    let mut input = json!({
        "prompt": prompt,
        "negative_prompt": NEGATIVE_PROMPT,
        "width": IMAGE_WIDTH,
        "height": IMAGE_HEIGHT,
        "num_outputs": 1,
    });

    if let Some(reference) = reference_image {
        input["image"] = json!(reference);
        input["image_prompt_strength"] = json!(REFERENCE_IMAGE_STRENGTH);
    }

    input
}

/// Build the input for animating a still image.
pub fn animation_input(prompt: &str, first_frame: &[u8]) -> Value {
    json!({
        "prompt": prompt,
        "prompt_optimizer": true,
        "first_frame_image": format!("data:image/png;base64,{}", BASE64.encode(first_frame)),
    })
}

#[async_trait]
impl MediaSynthesizer for ReplicateClient {
    async fn generate_image(&self, prompt: &str, reference_image: Option<&str>) -> ProviderResult<Vec<u8>> {
        if let Some(reference) = reference_image {
            info!(reference = %reference, "Generating image from reference");
        }
        let url = self
            .run(&self.image_model, image_input(prompt, reference_image))
            .await?;
        self.download(&url).await
    }

    async fn animate_image(&self, prompt: &str, first_frame: &[u8]) -> ProviderResult<Vec<u8>> {
        info!(prompt = %prompt, "Animating image");
        let url = self
            .run(&self.video_model, animation_input(prompt, first_frame))
            .await?;
        debug!(url = %url, "Animation ready");
        self.download(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ReplicateClient {
        ReplicateClient::new(ReplicateConfig {
            api_token: "r8-test".to_string(),
            base_url: server.uri(),
            image_model: "bytedance/seedream-4:v123".to_string(),
            video_model: "minimax/video-01".to_string(),
            poll_interval: Duration::from_millis(10),
        })
        .unwrap()
    }

    #[test]
    fn test_model_ref_parse() {
        let versioned = ModelRef::parse("bytedance/seedream-4:abc").unwrap();
        assert_eq!(versioned.owner, "bytedance");
        assert_eq!(versioned.name, "seedream-4");
        assert_eq!(versioned.version.as_deref(), Some("abc"));
        assert_eq!(versioned.to_string(), "bytedance/seedream-4:abc");

        let latest = ModelRef::parse("minimax/video-01").unwrap();
        assert!(latest.version.is_none());

        assert!(ModelRef::parse("no-owner").is_err());
        assert!(ModelRef::parse("a/b:").is_err());
        assert!(ModelRef::parse("a/b/c").is_err());
    }

    #[test]
    fn test_image_input_with_reference() {
        let plain = image_input("a cat", None);
        assert!(plain.get("image").is_none());
        assert_eq!(plain["width"], 1024);
        assert_eq!(plain["height"], 1792);

        let referenced = image_input("a cat", Some("http://localhost:3001/uploads/ref-1.png"));
        assert_eq!(referenced["image"], "http://localhost:3001/uploads/ref-1.png");
        assert_eq!(referenced["image_prompt_strength"], 0.35);
    }

    #[test]
    fn test_animation_input_embeds_frame() {
        let input = animation_input("pan", &[0xff, 0x00]);
        assert_eq!(input["prompt_optimizer"], true);
        assert_eq!(input["first_frame_image"], "data:image/png;base64,/wA=");
    }

    #[test]
    fn test_output_url_shapes() {
        assert_eq!(output_url(&json!("https://x/1.mp4")).as_deref(), Some("https://x/1.mp4"));
        assert_eq!(output_url(&json!(["https://x/1.png", "https://x/2.png"])).as_deref(), Some("https://x/1.png"));
        assert_eq!(output_url(&Value::Null), None);
        assert_eq!(output_url(&json!([])), None);
    }

    #[tokio::test]
    async fn test_generate_image_runs_versioned_prediction() {
        let server = MockServer::start().await;
        let file_url = format!("{}/files/out.png", server.uri());

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .and(header("authorization", "Bearer r8-test"))
            .and(body_partial_json(json!({ "version": "v123", "input": { "prompt": "a cat" } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p1",
                "status": "starting"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/predictions/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1",
                "status": "succeeded",
                "output": [file_url]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files/out.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNG".to_vec()))
            .mount(&server)
            .await;

        let bytes = client_for(&server).generate_image("a cat", None).await.unwrap();
        assert_eq!(bytes, b"PNG".to_vec());
    }

    #[tokio::test]
    async fn test_animate_uses_model_endpoint() {
        let server = MockServer::start().await;
        let file_url = format!("{}/files/out.mp4", server.uri());

        Mock::given(method("POST"))
            .and(path("/v1/models/minimax/video-01/predictions"))
            .and(body_partial_json(json!({ "input": { "prompt_optimizer": true } })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p2",
                "status": "succeeded",
                "output": file_url
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files/out.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"MP4".to_vec()))
            .mount(&server)
            .await;

        let bytes = client_for(&server).animate_image("pan", b"PNG").await.unwrap();
        assert_eq!(bytes, b"MP4".to_vec());
    }

    #[tokio::test]
    async fn test_failed_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p3",
                "status": "failed",
                "error": "NSFW content detected"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_image("x", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::PredictionFailed(ref msg) if msg.contains("NSFW")));
    }

    #[tokio::test]
    async fn test_latest_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models/bytedance/seedream-4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "owner": "bytedance",
                "name": "seedream-4",
                "latest_version": { "id": "v999" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let version = client.latest_version(client.image_model()).await.unwrap();
        assert_eq!(version.as_deref(), Some("v999"));
    }
}
