//! HTTP contract tests for the configuration routes

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use listarr_config::{Config, ConfigStore, LogLevel};
use listarr_server::{api_router, router, ConfigResponse};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn setup_store() -> (TempDir, Arc<ConfigStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ConfigStore::with_directory(temp_dir.path().join("config"));
    store.initialize().expect("Should initialize");
    (temp_dir, Arc::new(store))
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, ConfigResponse) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("Should build request");

    let response = app.oneshot(request).await.expect("Should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    let envelope = serde_json::from_slice(&bytes).expect("Should be an envelope");

    (status, envelope)
}

fn json_body(value: &serde_json::Value) -> Body {
    Body::from(serde_json::to_vec(value).expect("Should serialize"))
}

#[tokio::test]
async fn test_get_returns_current_document() {
    let (_temp_dir, store) = setup_store();

    let (status, envelope) = send(router(store), Method::GET, "/config", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.data, Some(Config::default()));
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn test_get_before_initialize_is_server_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(ConfigStore::with_directory(temp_dir.path()));

    let (status, envelope) = send(router(store), Method::GET, "/config", Body::empty()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(envelope.error.as_deref(), Some("Configuration not initialized"));
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn test_put_valid_document() {
    let (_temp_dir, store) = setup_store();

    let mut config = Config::default();
    config.app.log_level = LogLevel::Debug;
    let body = json_body(&serde_json::to_value(&config).expect("Should serialize"));

    let (status, envelope) = send(router(store.clone()), Method::PUT, "/config", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.data, Some(config.clone()));
    assert_eq!(store.get().expect("Should get"), config);
}

#[tokio::test]
async fn test_put_unknown_log_level_is_rejected() {
    let (_temp_dir, store) = setup_store();
    let before = fs::read(store.config_path()).expect("Should read");

    let mut value = serde_json::to_value(Config::default()).expect("Should serialize");
    value["app"]["logLevel"] = serde_json::json!("verbose");

    let (status, envelope) =
        send(router(store.clone()), Method::PUT, "/config", json_body(&value)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = envelope.error.expect("Should carry an error");
    assert!(message.contains("app.logLevel"));
    assert_eq!(fs::read(store.config_path()).expect("Should read"), before);
    assert_eq!(store.get().expect("Should get"), Config::default());
}

#[tokio::test]
async fn test_put_malformed_body_is_bad_request() {
    let (_temp_dir, store) = setup_store();

    let (status, envelope) = send(
        router(store),
        Method::PUT,
        "/config",
        Body::from("{ not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(envelope
        .error
        .expect("Should carry an error")
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_put_partial_document_is_bad_request() {
    let (_temp_dir, store) = setup_store();

    let body = json_body(&serde_json::json!({ "app": { "name": "listarr" } }));
    let (status, _envelope) = send(router(store), Method::PUT, "/config", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_write_failure_is_server_error() {
    let (_temp_dir, store) = setup_store();
    fs::remove_dir_all(store.config_dir()).expect("Should remove dir");
    fs::write(store.config_dir(), "blocked").expect("Should write");

    let body = json_body(&serde_json::to_value(Config::default()).expect("Should serialize"));
    let (status, envelope) = send(router(store), Method::PUT, "/config", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(envelope.error.is_some());
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let (_temp_dir, store) = setup_store();

    let mut config = Config::default();
    config.app.max_page_size = 42;
    store.update(config).expect("Should update");

    let (status, envelope) =
        send(router(store.clone()), Method::POST, "/config/reset", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.data, Some(Config::default()));
    assert_eq!(store.get().expect("Should get"), Config::default());
}

#[tokio::test]
async fn test_api_router_uses_version_prefix() {
    let (_temp_dir, store) = setup_store();

    let (status, envelope) = send(
        api_router(store),
        Method::GET,
        "/api/v1/config",
        Body::empty(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.data.is_some());
}
