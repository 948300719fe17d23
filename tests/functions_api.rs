//! Function Surface Tests
//!
//! Cross-cutting transport contract plus the models proxy and status
//! manifest:
//! - models proxy filters and sorts upstream ids, and maps catalog failures
//! - status manifest lists every function with its URL
//! - wrong methods, malformed JSON, and CORS preflight behave uniformly

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use traindeck::config::AppConfig;
use traindeck::handlers::models::{CatalogError, ModelCatalog};
use traindeck::handlers::AppState;
use traindeck::server::Server;
use traindeck::store::MemoryRowStore;

// =============================================================================
// Helper Functions
// =============================================================================

struct StaticCatalog(Vec<&'static str>);

#[async_trait::async_trait]
impl ModelCatalog for StaticCatalog {
    async fn list_model_ids(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

struct FailingCatalog(CatalogError);

#[async_trait::async_trait]
impl ModelCatalog for FailingCatalog {
    async fn list_model_ids(&self) -> Result<Vec<String>, CatalogError> {
        Err(self.0.clone())
    }
}

fn test_router(catalog: Arc<dyn ModelCatalog>) -> axum::Router {
    let state = Arc::new(AppState::with_backends(
        AppConfig::default(),
        Arc::new(MemoryRowStore::new()),
        catalog,
    ));
    Server::build_router(state)
}

async fn request(
    router: &axum::Router,
    method: &str,
    path: &str,
    body: &str,
) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// =============================================================================
// Models proxy
// =============================================================================

/// Upstream ids are filtered to the naming substring and sorted.
#[tokio::test]
async fn test_models_filtered_and_sorted() {
    let router = test_router(Arc::new(StaticCatalog(vec![
        "gpt-4",
        "text-embedding-3",
        "gpt-3.5-turbo",
    ])));

    let (status, body) = request(&router, "POST", "/functions/models", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["gpt-3.5-turbo", "gpt-4"]));
}

/// A missing API key is a configuration error, not an upstream one.
#[tokio::test]
async fn test_models_not_configured() {
    let router = test_router(Arc::new(FailingCatalog(CatalogError::NotConfigured)));

    let (status, body) = request(&router, "POST", "/functions/models", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "NOT_CONFIGURED");
}

/// Upstream failures surface the upstream status in the message.
#[tokio::test]
async fn test_models_upstream_failure() {
    let router = test_router(Arc::new(FailingCatalog(CatalogError::Status(502))));

    let (status, body) = request(&router, "POST", "/functions/models", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "UPSTREAM_ERROR");
    assert!(body["message"].as_str().unwrap().contains("502"));
}

// =============================================================================
// Status manifest
// =============================================================================

/// The manifest lists every function with its URL, on both GET and POST.
#[tokio::test]
async fn test_status_manifest() {
    let router = test_router(Arc::new(StaticCatalog(vec![])));

    for method in ["GET", "POST"] {
        let (status, body) = request(&router, method, "/functions/status", "").await;
        assert_eq!(status, StatusCode::OK);

        let functions = body["functions"].as_array().unwrap();
        assert_eq!(functions.len(), 5);
        let names: Vec<&str> = functions
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["exercises", "codes", "content", "models", "status"]);
        assert_eq!(functions[0]["url"], "/functions/exercises");
        assert!(body["generated_at"].is_string());
    }
}

// =============================================================================
// Transport contract
// =============================================================================

/// POST-only routes reject other methods with the standard envelope.
#[tokio::test]
async fn test_wrong_method_is_405() {
    let router = test_router(Arc::new(StaticCatalog(vec![])));

    for path in ["/functions/exercises", "/functions/codes", "/functions/models"] {
        let (status, body) = request(&router, "GET", path, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "path {}", path);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
        assert!(body["timestamp"].is_string());
    }
}

/// Malformed JSON gets the generic internal-error envelope.
#[tokio::test]
async fn test_malformed_json_is_internal_error() {
    let router = test_router(Arc::new(StaticCatalog(vec![])));

    let (status, body) = request(&router, "POST", "/functions/exercises", "{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
}

/// Preflight requests are answered permissively.
#[tokio::test]
async fn test_cors_preflight() {
    let router = test_router(Arc::new(StaticCatalog(vec![])));

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/functions/exercises")
                .header("origin", "https://app.example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
