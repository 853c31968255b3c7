mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use ttl_shortener::application::services::LinkRegistry;
use ttl_shortener::domain::entities::LinkRecord;
use ttl_shortener::domain::repositories::{LinkStore, StoreError, StoreResult};
use ttl_shortener::routes::build_router;
use ttl_shortener::state::AppState;

/// Store whose every call fails, standing in for an unreachable backend.
struct DownStore;

#[async_trait]
impl LinkStore for DownStore {
    async fn get(&self, _code: &str) -> StoreResult<Option<LinkRecord>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn put(&self, _code: &str, _record: LinkRecord) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn delete(&self, _code: &str) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "down"
    }
}

fn down_server() -> TestServer {
    let registry = Arc::new(LinkRegistry::new(
        Arc::new(DownStore) as Arc<dyn LinkStore>,
        Duration::from_secs(1),
    ));
    let state = AppState::new(registry, None);
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = down_server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
    assert!(
        !json.to_string().contains("connection refused"),
        "backend details must not leak"
    );
}

#[tokio::test]
async fn test_store_failure_maps_to_500() {
    let server = down_server();

    let response = server.get("/abc123").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Internal server error");
    assert_eq!(json["code"], "store_unavailable");

    let response = server
        .post("/shorten")
        .json(&serde_json::json!({ "originalUrl": "https://example.com" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("connection refused"));
}

#[tokio::test]
async fn test_health_route_wins_over_code() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "health", "https://example.com", 1).await;
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
}
