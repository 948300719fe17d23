//! # Models Proxy Handler
//!
//! `POST /functions/models`. Forwards to the external model-catalog API,
//! keeps only model ids containing the fixed naming substring, and returns
//! them sorted. The catalog sits behind a trait so tests can substitute a
//! static list.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;

use super::{method_not_allowed, AppState, HandlerError};

/// Substring a model id must contain to be returned.
pub const MODEL_FILTER: &str = "gpt";

/// Model catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("model catalog API key")]
    NotConfigured,

    #[error("model catalog unreachable: {0}")]
    Connection(String),

    #[error("model catalog returned status {0}")]
    Status(u16),

    #[error("model catalog returned an unreadable response: {0}")]
    Decode(String),
}

impl From<CatalogError> for HandlerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotConfigured => HandlerError::NotConfigured(err.to_string()),
            other => HandlerError::Upstream(other.to_string()),
        }
    }
}

/// External model-catalog listing.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// All model identifiers the upstream catalog advertises.
    async fn list_model_ids(&self) -> Result<Vec<String>, CatalogError>;
}

// Wire shapes of the upstream /v1/models response.

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelObject>,
}

#[derive(Debug, Deserialize)]
struct ModelObject {
    id: String,
}

/// Catalog backed by an OpenAI-compatible `/v1/models` endpoint.
pub struct OpenAiCatalog {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCatalog {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ModelCatalog for OpenAiCatalog {
    async fn list_model_ids(&self) -> Result<Vec<String>, CatalogError> {
        let api_key = self.api_key.as_ref().ok_or(CatalogError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .json::<ModelsResponse>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        Ok(body.data.into_iter().map(|m| m.id).collect())
    }
}

/// Keep ids containing the naming substring, sorted lexicographically.
pub fn filter_models(ids: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = ids.into_iter().filter(|id| id.contains(MODEL_FILTER)).collect();
    kept.sort();
    kept
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/models", post(models_handler).fallback(method_not_allowed))
        .with_state(state)
}

async fn models_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, HandlerError> {
    let ids = state.catalog.list_model_ids().await?;
    Ok(Json(filter_models(ids)))
}
