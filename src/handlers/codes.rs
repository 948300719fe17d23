//! # Codes Lookup Handler
//!
//! `POST /functions/codes` with `action: "list"`. Returns every access code
//! newest-first, each enriched with the title of the exercise or lesson it
//! points at. Title lookups are best-effort and independent per code: a
//! failed or missing target yields `"Unknown"`, never a failed batch.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use futures_util::future::join_all;
use serde_json::Value;

use crate::records::{tables, CodeTarget};
use crate::store::{RowStore, SelectQuery};

use super::{method_not_allowed, parse_body, AppState, HandlerError, HandlerResult};

/// Title used when a code's target cannot be resolved.
const UNKNOWN_TITLE: &str = "Unknown";

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/codes", post(codes_handler).fallback(method_not_allowed))
        .with_state(state)
}

async fn codes_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<Value>>, HandlerError> {
    let body = parse_body(&body)?;
    let action = body.get("action").and_then(Value::as_str).unwrap_or("");
    match action {
        "list" => list(&state).await,
        other => Err(HandlerError::InvalidAction(format!(
            "expected list, got '{}'",
            other
        ))),
    }
}

async fn list(state: &AppState) -> HandlerResult<Json<Vec<Value>>> {
    let codes = state
        .store
        .select(tables::CODES, SelectQuery::new().order_desc("created_at"))
        .await
        .map_err(|e| HandlerError::Database(format!("Failed to list codes: {}", e)))?;

    let enriched = join_all(
        codes
            .into_iter()
            .map(|row| enrich(state.store.as_ref(), row)),
    )
    .await;

    Ok(Json(enriched))
}

/// Attach a `title` to one code row, defaulting to "Unknown" on any failure.
async fn enrich(store: &dyn RowStore, mut row: Value) -> Value {
    let title = resolve_title(store, &row)
        .await
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    if let Some(obj) = row.as_object_mut() {
        obj.insert("title".to_string(), Value::String(title));
    }
    row
}

async fn resolve_title(store: &dyn RowStore, row: &Value) -> Option<String> {
    let target: CodeTarget = serde_json::from_value(row.get("type")?.clone()).ok()?;
    let target_id = row.get("target_id")?.as_str()?;
    let hit = store
        .select_one(target.table(), SelectQuery::new().filter("id", target_id))
        .await
        .ok()??;
    hit.get("title").and_then(Value::as_str).map(str::to_string)
}
