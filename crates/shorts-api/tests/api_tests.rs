//! API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use shorts_api::{create_router, ApiConfig, AppState};
use shorts_models::MetadataDocument;
use shorts_pipeline::testing::{fake_providers, FakeAligner, FakeMedia, FakeScriptProvider, FakeSpeech};
use shorts_pipeline::{AssetPipeline, PipelineConfig, Providers};

struct TestApp {
    router: Router,
    dir: tempfile::TempDir,
}

fn test_app_with(providers: Providers) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let pipeline_config = PipelineConfig {
        output_dir: dir.path().join("public"),
        latest_metadata_path: dir.path().join("src/metadata.json"),
    };
    std::fs::create_dir_all(pipeline_config.uploads_dir()).unwrap();

    let state = AppState::new(ApiConfig::default(), AssetPipeline::new(providers, pipeline_config));
    let handle = PrometheusBuilder::new().build_recorder().handle();

    TestApp {
        router: create_router(state, Some(handle)),
        dir,
    }
}

fn test_app() -> TestApp {
    test_app_with(fake_providers())
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "shorts-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload-reference")
        .header("Content-Type", format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert!(headers.contains_key("X-Content-Type-Options"));
    assert!(headers.contains_key("X-Frame-Options"));
    assert!(headers.contains_key("X-Request-ID"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/generate")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_voices_catalog() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::builder().uri("/api/voices").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let voices = body["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 3);
    assert_eq!(voices[0], json!({ "name": "Sarah", "id": "EXAVITQu4vr4xnSDxMaL" }));
}

#[tokio::test]
async fn test_generate_script() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json("/api/generate-script", json!({ "topic": "hydration" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(!body["script"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_script_missing_topic() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json("/api/generate-script", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_script_malformed_json() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_raw("/api/generate-script", Some("application/json"), "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_script_wrong_field_type() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json("/api/generate-script", json!({ "topic": 5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_generate_wrong_field_type() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/api/generate",
            json!({ "script": "s", "voice": "Sarah", "useVideo": "yes" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_generate_prompts_without_content_type() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_raw("/api/generate-prompts", None, r#"{"script":"s","topic":"t"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_script_provider_failure() {
    let providers = Providers::new(
        Arc::new(FakeScriptProvider::failing()),
        Arc::new(FakeSpeech::default()),
        Arc::new(FakeAligner::default()),
        Arc::new(FakeMedia::default()),
    );
    let app = test_app_with(providers);

    let response = app
        .router
        .oneshot(post_json("/api/generate-script", json!({ "topic": "hydration" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_generate_hydration_image_mode() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/api/generate",
            json!({
                "script": "Beba mais água. Seu corpo agradece.",
                "voice": "Sarah",
                "imagePrompts": ["glass of water"],
                "useVideo": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let latest = std::fs::read_to_string(app.dir.path().join("src/metadata.json")).unwrap();
    let document: MetadataDocument = serde_json::from_str(&latest).unwrap();
    assert!(!document.is_video_mode);
    assert_eq!(document.images.len(), 5);
    assert!(document.videos.is_empty());
    assert!(!document.words.is_empty());
}

#[tokio::test]
async fn test_generate_defaults_to_video_mode() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json("/api/generate", json!({ "script": "Short story.", "voice": "Roger" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let latest = std::fs::read_to_string(app.dir.path().join("src/metadata.json")).unwrap();
    let document: MetadataDocument = serde_json::from_str(&latest).unwrap();
    assert!(document.is_video_mode);
    assert_eq!(document.videos.len(), 5);
    assert!(document.videos.iter().all(|v| v.ends_with(".mp4")));
}

#[tokio::test]
async fn test_generate_segment_failure_reports_error() {
    let providers = Providers::new(
        Arc::new(FakeScriptProvider::default()),
        Arc::new(FakeSpeech::default()),
        Arc::new(FakeAligner::default()),
        Arc::new(FakeMedia::default().failing_on("FAIL")),
    );
    let app = test_app_with(providers);

    let response = app
        .router
        .oneshot(post_json(
            "/api/generate",
            json!({
                "script": "s",
                "voice": "Sarah",
                "imagePrompts": ["a", "b", "c", "FAIL", "e"],
                "useVideo": false
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Segment 3"));
    assert!(!app.dir.path().join("src/metadata.json").exists());
}

#[tokio::test]
async fn test_generate_rejects_too_many_prompts() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/api/generate",
            json!({
                "script": "s",
                "voice": "Sarah",
                "imagePrompts": ["1", "2", "3", "4", "5", "6"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_prompts() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/api/generate-prompts",
            json!({ "script": "s", "topic": "hydration", "useVideo": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["prompts"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generate_prompts_unparseable_reply_is_empty() {
    let providers = Providers::new(
        Arc::new(FakeScriptProvider::default().with_storyboard_reply("Sure! Here are some ideas.")),
        Arc::new(FakeSpeech::default()),
        Arc::new(FakeAligner::default()),
        Arc::new(FakeMedia::default()),
    );
    let app = test_app_with(providers);

    let response = app
        .router
        .oneshot(post_json("/api/generate-prompts", json!({ "script": "s", "topic": "t" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["prompts"], json!([]));
}

#[tokio::test]
async fn test_upload_reference_and_serve_it() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(multipart_request("referenceImage", "face.png", "image/png", b"\x89PNG fake"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("http://localhost:3001/uploads/ref-"));
    assert!(image_url.ends_with(".png"));

    let path = image_url.trim_start_matches("http://localhost:3001");
    let file_name = path.trim_start_matches("/uploads/");
    let stored = app.dir.path().join("public/uploads").join(file_name);
    assert_eq!(std::fs::read(&stored).unwrap(), b"\x89PNG fake");

    let served = app
        .router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_rejects_other_types() {
    let app = test_app();

    let response = app
        .router
        .oneshot(multipart_request("referenceImage", "notes.txt", "text/plain", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_upload_without_file() {
    let app = test_app();

    let response = app
        .router
        .oneshot(multipart_request("somethingElse", "face.png", "image/png", b"data"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_upload_just_over_image_limit() {
    let app = test_app();
    let limit = ApiConfig::default().max_upload_size;
    let data = vec![0u8; limit + 1];

    let response = app
        .router
        .oneshot(multipart_request("referenceImage", "big.png", "image/png", &data))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await["success"], false);
    assert!(!app.dir.path().join("public/uploads").read_dir().unwrap().any(|_| true));
}

#[tokio::test]
async fn test_upload_over_body_limit() {
    let app = test_app();
    let data = vec![0u8; 13 * 1024 * 1024];
    assert!(data.len() > ApiConfig::default().max_body_size);

    let response = app
        .router
        .oneshot(multipart_request("referenceImage", "huge.png", "image/png", &data))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}
