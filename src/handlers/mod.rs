//! # Request Handlers
//!
//! The five stateless JSON functions: exercises, codes, content, models,
//! status. Each module exposes a `routes` function returning an axum Router;
//! all of them share one `AppState` built once per process.

pub mod codes;
pub mod content;
mod errors;
pub mod exercise;
pub mod models;
pub mod status;

pub use errors::{ErrorEnvelope, HandlerError, HandlerResult};

use std::sync::Arc;

use axum::body::Bytes;
use serde_json::Value;

use crate::config::AppConfig;
use crate::store::{HttpRowStore, MemoryRowStore, RowStore};

use self::models::{ModelCatalog, OpenAiCatalog};

/// Shared application state, constructed once per process and passed
/// explicitly into every handler router.
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub catalog: Arc<dyn ModelCatalog>,
    pub config: AppConfig,
}

impl AppState {
    /// Build state from configuration. Without store credentials the state
    /// falls back to an in-memory store so the surface stays usable in
    /// local development.
    pub fn from_config(config: AppConfig) -> Self {
        let store: Arc<dyn RowStore> = match (&config.store_url, &config.service_key) {
            (Some(url), Some(key)) => Arc::new(HttpRowStore::new(url.clone(), key.clone())),
            _ => {
                tracing::warn!("row store not configured; using an in-memory store");
                Arc::new(MemoryRowStore::new())
            }
        };
        let catalog = Arc::new(OpenAiCatalog::new(
            config.models_api_url.clone(),
            config.models_api_key.clone(),
        ));
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Build state over explicit backends (used by tests).
    pub fn with_backends(
        config: AppConfig,
        store: Arc<dyn RowStore>,
        catalog: Arc<dyn ModelCatalog>,
    ) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }
}

/// Parse a request body as JSON. An empty body is treated as an empty
/// object; anything unparseable is the generic internal error per the
/// transport contract.
pub(crate) fn parse_body(bytes: &Bytes) -> HandlerResult<Value> {
    if bytes.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(bytes)
        .map_err(|e| HandlerError::Internal(format!("malformed JSON body: {}", e)))
}

/// Pull a required non-empty string field out of a JSON object.
pub(crate) fn opt_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Fallback for wrong-method requests on POST-only routes.
pub(crate) async fn method_not_allowed() -> HandlerError {
    HandlerError::MethodNotAllowed
}
