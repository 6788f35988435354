use axum::Json;
use serde::Serialize;
use shorts_models::{Voice, VOICE_CATALOG};

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: &'static [Voice],
}

/// Static voice catalog offered to the frontend.
pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse { voices: VOICE_CATALOG })
}
