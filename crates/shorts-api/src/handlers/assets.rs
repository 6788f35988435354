//! Script, prompt and asset generation handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

// ============================================================================
// Script
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateScriptRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 500))]
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateScriptResponse {
    pub success: bool,
    pub script: String,
}

/// Write a narration script for a topic.
pub async fn generate_script(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateScriptRequest>,
) -> ApiResult<Json<GenerateScriptResponse>> {
    request.validate()?;
    info!(topic = %request.topic, "Script generation requested");

    let script = state.pipeline.generate_script(&request.topic).await?;

    Ok(Json(GenerateScriptResponse { success: true, script }))
}

// ============================================================================
// Assets
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssetsRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub script: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub voice: String,

    /// Positional overrides, at most one per segment
    #[validate(length(max = 5))]
    pub image_prompts: Option<Vec<String>>,

    #[validate(url)]
    pub reference_image_url: Option<String>,

    pub use_video: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAssetsResponse {
    pub success: bool,
    pub message: String,
}

/// Run the asset pipeline to completion. Video mode unless `useVideo` is false.
pub async fn generate_assets(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateAssetsRequest>,
) -> ApiResult<Json<GenerateAssetsResponse>> {
    request.validate()?;

    let use_video = request.use_video.unwrap_or(true);
    info!(
        script_chars = request.script.chars().count(),
        voice = %request.voice,
        use_video,
        reference_image = request.reference_image_url.as_deref().unwrap_or("none"),
        "Asset generation requested"
    );

    state
        .pipeline
        .run_asset_pipeline(
            &request.script,
            &request.voice,
            request.image_prompts,
            request.reference_image_url,
            use_video,
        )
        .await?;

    Ok(Json(GenerateAssetsResponse {
        success: true,
        message: "Assets generated successfully".to_string(),
    }))
}

// ============================================================================
// Storyboard prompts
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptsRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub script: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 500))]
    pub topic: String,

    #[serde(default)]
    pub use_video: bool,
}

#[derive(Debug, Serialize)]
pub struct GeneratePromptsResponse {
    pub success: bool,
    pub prompts: Vec<String>,
}

/// Generate a storyboard of scene prompts, motion-focused when `useVideo` is set.
pub async fn generate_prompts(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GeneratePromptsRequest>,
) -> ApiResult<Json<GeneratePromptsResponse>> {
    request.validate()?;
    info!(topic = %request.topic, use_video = request.use_video, "Storyboard requested");

    let prompts = state
        .pipeline
        .generate_prompts(&request.script, &request.topic, request.use_video)
        .await?;

    Ok(Json(GeneratePromptsResponse { success: true, prompts }))
}
