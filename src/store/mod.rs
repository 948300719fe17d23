//! # Row Store
//!
//! Generic row-level access to the external relational store: select with
//! equality filters, ordering and a limit, and insert-and-return. No raw
//! query language crosses this boundary.

mod errors;
mod http;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use http::HttpRowStore;
pub use memory::MemoryRowStore;

use async_trait::async_trait;
use serde_json::Value;

/// A single equality filter on one column.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// Ordering on one column.
#[derive(Debug, Clone)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// A select query: equality filters, optional order, optional limit.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Order descending by a column.
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: true,
        });
        self
    }

    /// Order ascending by a column.
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: false,
        });
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Row-level store access.
///
/// Implemented over HTTP for the real store and in memory for tests.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Select rows matching the query.
    async fn select(&self, table: &str, query: SelectQuery) -> StoreResult<Vec<Value>>;

    /// Insert a row and return it as stored.
    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value>;

    /// Select at most one row matching the query.
    async fn select_one(&self, table: &str, query: SelectQuery) -> StoreResult<Option<Value>> {
        let rows = self.select(table, query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }
}
