use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use imagen_proxy::{
    Result,
    config::{Config, ImagenConfig, LogsConfig, ServerConfig},
    imagen::ImagenClient,
    server::{AppState, GENERATE_IMAGE_PATH, router},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::fs;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

pub const PREDICT_PATH: &str = "/v1beta/models/imagen-3.0-generate-002:predict";

/// An address nothing listens on, for simulating transport failures
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

/// Create a test configuration pointing the upstream at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            allowed_origins: vec![],
        },
        imagen: ImagenConfig {
            base_url: base_url.to_string(),
            model: "imagen-3.0-generate-002".to_string(),
            api_key: TEST_API_KEY.to_string(),
        },
    }
}

/// Router wired to a real `ImagenClient` talking to `base_url`
pub fn create_test_app(base_url: &str) -> Router {
    let config = create_test_config(base_url);
    router(AppState::new(ImagenClient::new(config.imagen)))
}

/// Router wired to a wiremock upstream
pub fn create_stubbed_app(upstream: &MockServer) -> Router {
    create_test_app(&upstream.uri())
}

pub fn prompt_request(prompt: &str) -> Request<Body> {
    json_request(json!({ "prompt": prompt }))
}

pub fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(GENERATE_IMAGE_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub fn predictions_body(bytes: &str) -> Value {
    json!({ "predictions": [{ "bytesBase64Encoded": bytes, "mimeType": "image/png" }] })
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 3000
  logs:
    level: "debug"
  allowed_origins:
    - "https://example.com"

imagen:
  base_url: "http://localhost:9000"
  model: "imagen-3.0-fast-generate-001"
"#;

/// Only overrides the port; everything else falls back to defaults
pub const PARTIAL_CONFIG_YAML: &str = r#"
server:
  port: 9090
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: "not-a-number"
"#;
