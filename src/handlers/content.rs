//! # Content Creation Handler
//!
//! `POST /functions/content` with a `type` discriminator of "lesson" or
//! "exercise". The older, simpler creation path: one direct insert, no case
//! and no access code. Exercises created here carry `focus_area` and an
//! optional `lesson_id` instead of a case reference.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::records::{self, tables, Lesson};

use super::{method_not_allowed, opt_str, parse_body, AppState, HandlerError, HandlerResult};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/content",
            post(content_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Exercise row as written by this handler.
#[derive(Debug, Serialize)]
struct ContentExercise {
    id: String,
    title: String,
    focus_area: String,
    lesson_id: Option<String>,
    created_at: DateTime<Utc>,
}

async fn content_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, HandlerError> {
    let body = parse_body(&body)?;
    let kind = body.get("type").and_then(Value::as_str).unwrap_or("");
    match kind {
        "lesson" => create_lesson(&state, &body).await,
        "exercise" => create_exercise(&state, &body).await,
        other => Err(HandlerError::Validation(format!(
            "unrecognized content type '{}'",
            other
        ))),
    }
}

async fn create_lesson(state: &AppState, body: &Value) -> HandlerResult<Json<Value>> {
    let title = opt_str(body, "title")
        .ok_or_else(|| HandlerError::Validation("title is required".to_string()))?;

    let lesson = Lesson::new(title);
    insert(state, tables::LESSONS, &lesson, "Failed to create lesson").await
}

async fn create_exercise(state: &AppState, body: &Value) -> HandlerResult<Json<Value>> {
    let title = opt_str(body, "title")
        .ok_or_else(|| HandlerError::Validation("title is required".to_string()))?;
    let focus_area = opt_str(body, "focus_area")
        .ok_or_else(|| HandlerError::Validation("focus_area is required".to_string()))?;

    let exercise = ContentExercise {
        id: records::record_id(records::prefixes::EXERCISE),
        title,
        focus_area,
        lesson_id: opt_str(body, "lesson_id"),
        created_at: Utc::now(),
    };
    insert(state, tables::EXERCISES, &exercise, "Failed to create exercise").await
}

async fn insert<T: Serialize>(
    state: &AppState,
    table: &str,
    record: &T,
    context: &str,
) -> HandlerResult<Json<Value>> {
    let row = serde_json::to_value(record)
        .map_err(|e| HandlerError::Internal(format!("{}: {}", context, e)))?;
    state
        .store
        .insert(table, row)
        .await
        .map(Json)
        .map_err(|e| HandlerError::Database(format!("{}: {}", context, e)))
}
