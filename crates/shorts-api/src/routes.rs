//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::services::ServeDir;

use crate::handlers::{
    generate_assets, generate_prompts, generate_script, health, list_voices, ready, upload_reference,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
///
/// Anything not matched by an API, probe or metrics route is served from the
/// output directory, which is where the renderer and uploaded references
/// load their files from.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/generate-script", post(generate_script))
        .route("/generate", post(generate_assets))
        .route("/generate-prompts", post(generate_prompts))
        .route("/voices", get(list_voices))
        .route("/upload-reference", post(upload_reference));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let static_files = ServeDir::new(&state.pipeline_config().output_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .fallback_service(static_files)
        // Enforced by the Json and Multipart extractors, so oversize bodies
        // surface as 413 through ApiError.
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
