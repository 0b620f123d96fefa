//! Generic tabular store used for languages and translations.
//!
//! The hosted backend exposes each table through `select`, `insert`,
//! `upsert`, `update` and `delete`. Rows travel as JSON objects; callers
//! decode them into their own types with [`decode_rows`].
//!
//! - `rest`: PostgREST-compatible HTTP client
//! - `memory`: in-process store for offline runs and tests

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Table holding the supported languages
pub const LANGUAGES_TABLE: &str = "languages";

/// Table holding admin-editable translation entries
pub const TRANSLATIONS_TABLE: &str = "translations";

/// Row filter applied to select, update and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq(String, String),
    /// `column IN (values)`
    In(String, Vec<String>),
}

impl Filter {
    pub fn eq(column: &str, value: &str) -> Self {
        Filter::Eq(column.to_string(), value.to_string())
    }

    pub fn is_in<S: AsRef<str>>(column: &str, values: &[S]) -> Self {
        Filter::In(
            column.to_string(),
            values.iter().map(|v| v.as_ref().to_string()).collect(),
        )
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _) | Filter::In(column, _) => column,
        }
    }

    /// Check a JSON row against this filter.
    ///
    /// Non-string columns are compared through their JSON rendering so that
    /// booleans and numbers can be filtered with `"true"` or `"42"`.
    pub fn matches(&self, row: &Value) -> bool {
        let Some(field) = row.get(self.column()) else {
            return false;
        };
        let rendered = match field {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match self {
            Filter::Eq(_, value) => rendered == *value,
            Filter::In(_, values) => values.iter().any(|v| *v == rendered),
        }
    }
}

/// Remote tabular store.
///
/// Implementations must be safe to share between tasks; the loader and the
/// editor hold the same store behind an `Arc`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read all rows of `table` matching every filter
    async fn select(&self, table: &str, filters: &[Filter]) -> StoreResult<Vec<Value>>;

    /// Insert rows, returning them as stored
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<Vec<Value>>;

    /// Insert or merge rows that collide on the `on_conflict` columns
    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &[&str],
    ) -> StoreResult<Vec<Value>>;

    /// Merge `patch` into every row matching the filters
    async fn update(&self, table: &str, filters: &[Filter], patch: Value)
        -> StoreResult<Vec<Value>>;

    /// Remove every row matching the filters
    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()>;
}

/// Decode raw JSON rows into typed records.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}
