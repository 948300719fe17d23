//! HTTP row store
//!
//! Talks to the external store's row-level REST interface. Filters are sent
//! as `column=eq.value` query parameters, ordering as `order=column.dir`,
//! and inserts ask the store to echo the stored row back.

use async_trait::async_trait;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{RowStore, SelectQuery};

/// Row store backed by the external store's REST interface.
pub struct HttpRowStore {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl HttpRowStore {
    /// Create a store handle. `base_url` points at the row API root,
    /// `service_key` is the privileged credential sent with every request.
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn query_params(query: &SelectQuery) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for filter in &query.filters {
            params.push((filter.column.clone(), format!("eq.{}", scalar(&filter.value))));
        }
        if let Some(order) = &query.order {
            let dir = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Query {
            status: status.as_u16(),
            message,
        })
    }
}

/// Render a filter value the way the row API expects it in a query string.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RowStore for HttpRowStore {
    async fn select(&self, table: &str, query: SelectQuery) -> StoreResult<Vec<Value>> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(&Self::query_params(&query))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let response = Self::check(response).await?;
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let response = Self::check(response).await?;
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        // The row API echoes inserts back as a one-element array.
        match body {
            Value::Array(mut rows) if !rows.is_empty() => Ok(rows.remove(0)),
            Value::Array(_) => Err(StoreError::Decode("insert returned no rows".to_string())),
            other => Ok(other),
        }
    }
}
