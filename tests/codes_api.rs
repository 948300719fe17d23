//! Codes Lookup Handler Tests
//!
//! Contract tests for POST /functions/codes:
//! - list returns every code newest-first with an enriched title
//! - per-row title lookups are best-effort: failures become "Unknown"
//! - zero codes is an empty array, never null

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use traindeck::config::AppConfig;
use traindeck::handlers::models::{CatalogError, ModelCatalog};
use traindeck::handlers::AppState;
use traindeck::server::Server;
use traindeck::store::MemoryRowStore;

// =============================================================================
// Helper Functions
// =============================================================================

struct NoCatalog;

#[async_trait::async_trait]
impl ModelCatalog for NoCatalog {
    async fn list_model_ids(&self) -> Result<Vec<String>, CatalogError> {
        Err(CatalogError::NotConfigured)
    }
}

fn test_router(store: Arc<MemoryRowStore>) -> axum::Router {
    let state = Arc::new(AppState::with_backends(
        AppConfig::default(),
        store,
        Arc::new(NoCatalog),
    ));
    Server::build_router(state)
}

async fn list_codes(router: &axum::Router) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/functions/codes")
                .header("content-type", "application/json")
                .body(Body::from(json!({"action": "list"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn seed_code(store: &MemoryRowStore, id: &str, kind: &str, target_id: &str, created_at: &str) {
    store.seed(
        "codes",
        json!({
            "id": id,
            "type": kind,
            "target_id": target_id,
            "created_at": created_at
        }),
    );
}

// =============================================================================
// Tests
// =============================================================================

/// Zero codes returns an empty array.
#[tokio::test]
async fn test_empty_store_returns_empty_array() {
    let store = Arc::new(MemoryRowStore::new());
    let router = test_router(store);

    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

/// Each code is enriched with the title of its exercise or lesson target,
/// newest first.
#[tokio::test]
async fn test_titles_resolved_per_target_type() {
    let store = Arc::new(MemoryRowStore::new());
    store.seed(
        "exercises",
        json!({"id": "ex_00000000000000000a", "title": "Intake interview", "created_at": "2026-01-01T00:00:00Z"}),
    );
    store.seed(
        "lessons",
        json!({"id": "ls_00000000000000000a", "title": "Handover basics", "created_at": "2026-01-01T00:00:00Z"}),
    );
    seed_code(&store, "EX-AAAAAA", "exercise", "ex_00000000000000000a", "2026-01-01T00:00:00Z");
    seed_code(&store, "LS-BBBBBB", "lesson", "ls_00000000000000000a", "2026-01-02T00:00:00Z");

    let router = test_router(store);
    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "LS-BBBBBB");
    assert_eq!(entries[0]["title"], "Handover basics");
    assert_eq!(entries[1]["id"], "EX-AAAAAA");
    assert_eq!(entries[1]["title"], "Intake interview");
}

/// A code whose target row is missing gets "Unknown" instead of failing.
#[tokio::test]
async fn test_missing_target_defaults_to_unknown() {
    let store = Arc::new(MemoryRowStore::new());
    seed_code(&store, "EX-AAAAAA", "exercise", "ex_gone", "2026-01-01T00:00:00Z");

    let router = test_router(store);
    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Unknown");
}

/// A failing target table never aborts the batch: the healthy row is still
/// enriched, the broken one defaults.
#[tokio::test]
async fn test_target_lookup_failure_is_isolated() {
    let store = Arc::new(MemoryRowStore::new());
    store.seed(
        "lessons",
        json!({"id": "ls_00000000000000000a", "title": "Handover basics", "created_at": "2026-01-01T00:00:00Z"}),
    );
    seed_code(&store, "EX-AAAAAA", "exercise", "ex_00000000000000000a", "2026-01-01T00:00:00Z");
    seed_code(&store, "LS-BBBBBB", "lesson", "ls_00000000000000000a", "2026-01-02T00:00:00Z");
    store.fail_table("exercises");

    let router = test_router(store);
    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries[0]["title"], "Handover basics");
    assert_eq!(entries[1]["title"], "Unknown");
}

/// An unrecognized type value defaults to "Unknown" as well.
#[tokio::test]
async fn test_unrecognized_target_type_defaults_to_unknown() {
    let store = Arc::new(MemoryRowStore::new());
    seed_code(&store, "QZ-CCCCCC", "quiz", "qz_1", "2026-01-01T00:00:00Z");

    let router = test_router(store);
    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Unknown");
}

/// A failed codes read is fatal.
#[tokio::test]
async fn test_codes_read_failure_is_500() {
    let store = Arc::new(MemoryRowStore::new());
    store.fail_table("codes");

    let router = test_router(store);
    let (status, body) = list_codes(&router).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DATABASE_ERROR");
}

/// Only the list action is supported.
#[tokio::test]
async fn test_unknown_action_is_400() {
    let store = Arc::new(MemoryRowStore::new());
    let router = test_router(store);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/functions/codes")
                .header("content-type", "application/json")
                .body(Body::from(json!({"action": "purge"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "INVALID_ACTION");
}
