//! In-memory row store
//!
//! Backs the integration tests and local development. Supports the same
//! select/insert semantics as the HTTP store, plus per-table failure
//! injection so degraded paths can be exercised.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{RowStore, SelectQuery};

/// Row store held entirely in process memory.
#[derive(Default)]
pub struct MemoryRowStore {
    /// table -> rows
    data: RwLock<HashMap<String, Vec<Value>>>,
    /// Tables that fail every operation until healed.
    failing: RwLock<HashSet<String>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `table` fail.
    pub fn fail_table(&self, table: &str) {
        self.failing.write().unwrap().insert(table.to_string());
    }

    /// Undo `fail_table`.
    pub fn heal_table(&self, table: &str) {
        self.failing.write().unwrap().remove(table);
    }

    /// Seed a row directly, bypassing failure injection.
    pub fn seed(&self, table: &str, row: Value) {
        self.data
            .write()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    fn check_failing(&self, table: &str) -> StoreResult<()> {
        if self.failing.read().unwrap().contains(table) {
            return Err(StoreError::Query {
                status: 500,
                message: format!("table '{}' is unavailable", table),
            });
        }
        Ok(())
    }

    fn apply_ordering(rows: &mut [Value], query: &SelectQuery) {
        let Some(order) = &query.order else {
            return;
        };
        rows.sort_by(|a, b| {
            let a_val = a.get(&order.column);
            let b_val = b.get(&order.column);
            let cmp = match (a_val, b_val) {
                (Some(Value::Number(a)), Some(Value::Number(b))) => {
                    let a = a.as_f64().unwrap_or(0.0);
                    let b = b.as_f64().unwrap_or(0.0);
                    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
                }
                (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
                _ => std::cmp::Ordering::Equal,
            };
            if order.descending {
                cmp.reverse()
            } else {
                cmp
            }
        });
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn select(&self, table: &str, query: SelectQuery) -> StoreResult<Vec<Value>> {
        self.check_failing(table)?;

        let data = self.data.read().unwrap();
        let rows = data.get(table).cloned().unwrap_or_default();

        let mut matched: Vec<Value> = rows
            .into_iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|f| row.get(&f.column) == Some(&f.value))
            })
            .collect();

        Self::apply_ordering(&mut matched, &query);

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        self.check_failing(table)?;
        self.seed(table, row.clone());
        Ok(row)
    }
}
