//! # Exercise Handler
//!
//! `POST /functions/exercises` with an `action` discriminator:
//!
//! - `create` — insert a case, an exercise referencing it, and a shareable
//!   access code referencing the exercise. The three inserts run in order
//!   with no rollback; a failure partway leaves the earlier rows in place.
//! - `list` — all exercises newest-first, each paired with its code (null
//!   when the code read fails or no code exists).
//! - `get` — resolve by exercise id, falling back to resolving the input as
//!   an access code.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::{self, tables, Code, Exercise};
use crate::store::SelectQuery;

use super::{method_not_allowed, opt_str, parse_body, AppState, HandlerError, HandlerResult};

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/exercises",
            post(exercise_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn exercise_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, HandlerError> {
    let body = parse_body(&body)?;
    let action = body.get("action").and_then(Value::as_str).unwrap_or("");
    match action {
        "create" => create(&state, body).await.map(IntoResponse::into_response),
        "list" => list(&state).await.map(IntoResponse::into_response),
        "get" => get(&state, &body).await.map(IntoResponse::into_response),
        other => Err(HandlerError::InvalidAction(format!(
            "expected create, list or get, got '{}'",
            other
        ))),
    }
}

// ==================
// create
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: Option<String>,
    #[serde(default)]
    protocol_stack: Vec<String>,
    case: Option<CaseRequest>,
    #[serde(default)]
    toggles: Map<String, Value>,
    focus_hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaseRequest {
    role: Option<String>,
    background: Option<String>,
    goals: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    exercise_id: String,
    code: String,
    exercise: Value,
    code_record: Value,
}

async fn create(state: &AppState, body: Value) -> HandlerResult<Json<CreateResponse>> {
    let request: CreateRequest = serde_json::from_value(body)
        .map_err(|e| HandlerError::Validation(format!("invalid create payload: {}", e)))?;

    let title = non_empty(request.title);
    let (role, background, goals) = match request.case {
        Some(case) => (non_empty(case.role), non_empty(case.background), case.goals),
        None => (None, None, None),
    };

    let (title, role, background) = match (title, role, background) {
        (Some(title), Some(role), Some(background)) => (title, role, background),
        (title, role, background) => {
            let mut missing = Vec::new();
            if title.is_none() {
                missing.push("title");
            }
            if role.is_none() {
                missing.push("case.role");
            }
            if background.is_none() {
                missing.push("case.background");
            }
            return Err(HandlerError::MissingRequiredFields(missing.join(", ")));
        }
    };

    let case = records::Case::new(role, background, goals);
    insert_row(state, tables::CASES, &case, "Failed to create case").await?;

    let exercise = Exercise {
        id: records::record_id(records::prefixes::EXERCISE),
        title,
        case_id: Some(case.id.clone()),
        protocols: request.protocol_stack,
        toggles: request.toggles,
        focus_hint: request.focus_hint,
        created_at: chrono::Utc::now(),
        extra: Map::new(),
    };
    let exercise_row =
        insert_row(state, tables::EXERCISES, &exercise, "Failed to create exercise").await?;

    let code = Code::for_exercise(exercise.id.clone());
    let code_row = insert_row(state, tables::CODES, &code, "Failed to create access code").await?;

    Ok(Json(CreateResponse {
        exercise_id: exercise.id,
        code: code.id,
        exercise: exercise_row,
        code_record: code_row,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

async fn insert_row<T: Serialize>(
    state: &AppState,
    table: &str,
    record: &T,
    context: &str,
) -> HandlerResult<Value> {
    let row = serde_json::to_value(record)
        .map_err(|e| HandlerError::Internal(format!("{}: {}", context, e)))?;
    state
        .store
        .insert(table, row)
        .await
        .map_err(|e| HandlerError::Database(format!("{}: {}", context, e)))
}

// ==================
// list
// ==================

async fn list(state: &AppState) -> HandlerResult<Json<Vec<Value>>> {
    let exercises = state
        .store
        .select(
            tables::EXERCISES,
            SelectQuery::new().order_desc("created_at"),
        )
        .await
        .map_err(|e| HandlerError::Database(format!("Failed to list exercises: {}", e)))?;

    // Code read failures degrade: exercises still go out, codes come back null.
    let codes = match state
        .store
        .select(tables::CODES, SelectQuery::new().filter("type", "exercise"))
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "code read failed; listing exercises without codes");
            Vec::new()
        }
    };

    let code_by_target: HashMap<String, String> = codes
        .iter()
        .filter_map(|row| {
            let target = row.get("target_id")?.as_str()?;
            let id = row.get("id")?.as_str()?;
            Some((target.to_string(), id.to_string()))
        })
        .collect();

    let entries = exercises
        .into_iter()
        .map(|mut row| {
            let code = row
                .get("id")
                .and_then(Value::as_str)
                .and_then(|id| code_by_target.get(id))
                .cloned()
                .map(Value::String)
                .unwrap_or(Value::Null);
            if let Some(obj) = row.as_object_mut() {
                obj.insert("code".to_string(), code);
            }
            row
        })
        .collect();

    Ok(Json(entries))
}

// ==================
// get
// ==================

async fn get(state: &AppState, body: &Value) -> HandlerResult<Json<Value>> {
    let input = opt_str(body, "exerciseId")
        .ok_or_else(|| HandlerError::MissingRequiredFields("exerciseId".to_string()))?;

    if let Some(row) = find_exercise(state, &input).await? {
        return Ok(Json(row));
    }

    // Not a direct id; try to resolve the input as an access code.
    let code_row = state
        .store
        .select_one(
            tables::CODES,
            SelectQuery::new()
                .filter("id", input.as_str())
                .filter("type", "exercise"),
        )
        .await
        .map_err(|e| HandlerError::InvalidExerciseCode(format!("{}: {}", input, e)))?
        .ok_or_else(|| HandlerError::ExerciseNotFound(input.clone()))?;

    let target_id = code_row
        .get("target_id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            HandlerError::InvalidExerciseCode(format!("{}: code record has no target", input))
        })?;

    find_exercise(state, target_id)
        .await?
        .map(Json)
        .ok_or_else(|| HandlerError::ExerciseNotFound(input))
}

async fn find_exercise(state: &AppState, id: &str) -> HandlerResult<Option<Value>> {
    state
        .store
        .select_one(tables::EXERCISES, SelectQuery::new().filter("id", id))
        .await
        .map_err(|e| HandlerError::Database(format!("Failed to look up exercise: {}", e)))
}
