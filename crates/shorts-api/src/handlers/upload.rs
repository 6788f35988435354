//! Reference image upload.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "referenceImage";

const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
}

/// Store an uploaded reference image under the uploads directory and return
/// the URL it is served from.
pub async fn upload_reference(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::UnsupportedMediaType(
                "Invalid format. Use JPEG, PNG or WebP.".to_string(),
            ));
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if bytes.len() > state.config.max_upload_size {
            return Err(ApiError::PayloadTooLarge(format!(
                "Image exceeds {} bytes",
                state.config.max_upload_size
            )));
        }

        let file_name = reference_file_name(&original_name, chrono::Utc::now().timestamp_millis());
        let uploads_dir = state.pipeline_config().uploads_dir();
        tokio::fs::create_dir_all(&uploads_dir)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to create uploads directory: {}", e)))?;
        tokio::fs::write(uploads_dir.join(&file_name), &bytes)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to store upload: {}", e)))?;

        let image_url = format!("{}/uploads/{}", state.config.public_base_url, file_name);
        info!(image_url = %image_url, bytes = bytes.len(), "Reference image uploaded");
        metrics::record_upload(bytes.len());

        return Ok(Json(UploadResponse {
            success: true,
            image_url,
        }));
    }

    Err(ApiError::bad_request("No image uploaded"))
}

/// `ref-{millis}{ext}`, keeping the original extension (with its dot) if any.
pub fn reference_file_name(original_name: &str, millis: i64) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    format!("ref-{}{}", millis, ext)
}
