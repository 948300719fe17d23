//! # Deployment-Status Handler
//!
//! `GET|POST /functions/status`. Pure function of the fixed handler list:
//! returns the expected function names and their URLs with no data access.

use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The functions this deployment is expected to expose.
pub const FUNCTION_NAMES: [&str; 5] = ["exercises", "codes", "content", "models", "status"];

#[derive(Debug, Clone, Serialize)]
pub struct FunctionEntry {
    pub name: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusManifest {
    pub functions: Vec<FunctionEntry>,
    pub generated_at: DateTime<Utc>,
}

/// Build the static manifest.
pub fn manifest() -> StatusManifest {
    StatusManifest {
        functions: FUNCTION_NAMES
            .into_iter()
            .map(|name| FunctionEntry {
                name,
                url: format!("/functions/{}", name),
            })
            .collect(),
        generated_at: Utc::now(),
    }
}

pub fn routes() -> Router {
    Router::new().route("/status", get(status_handler).post(status_handler))
}

async fn status_handler() -> Json<StatusManifest> {
    Json(manifest())
}
