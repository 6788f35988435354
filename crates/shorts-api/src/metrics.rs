//! Prometheus metrics for the API server.
//!
//! The pipeline records its job metrics through the same global recorder.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "shorts_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "shorts_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "shorts_http_requests_in_flight";
    pub const UPLOADS_TOTAL: &str = "shorts_reference_uploads_total";
    pub const UPLOAD_BYTES: &str = "shorts_reference_upload_bytes";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a stored reference upload.
pub fn record_upload(bytes: usize) {
    counter!(names::UPLOADS_TOTAL).increment(1);
    histogram!(names::UPLOAD_BYTES).record(bytes as f64);
}

/// Routes that keep their own `path` label.
const KNOWN_PATHS: &[&str] = &[
    "/api/generate-script",
    "/api/generate",
    "/api/generate-prompts",
    "/api/voices",
    "/api/upload-reference",
    "/metrics",
    "/health",
    "/healthz",
    "/ready",
];

/// Map a request path to a bounded set of label values.
fn sanitize_path(path: &str) -> String {
    if KNOWN_PATHS.contains(&path) {
        path.to_string()
    } else if path.starts_with("/api/") {
        "/api/:unknown".to_string()
    } else if path.starts_with("/uploads/") {
        "/uploads/:file".to_string()
    } else {
        "/:static".to_string()
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
