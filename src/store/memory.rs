use super::{Filter, RemoteStore};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process table store.
///
/// Backs offline runs (no `STORE_URL`) and lets tests observe how many
/// reads reached the store and inject failures.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    selects: Mutex<HashMap<String, usize>>,
    writes: AtomicUsize,
    failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows (replaces any existing rows)
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.lock_tables().insert(table.to_string(), rows);
        self
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of `select` calls made against `table`, failed ones included
    pub fn select_count(&self, table: &str) -> usize {
        self.selects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    /// Number of successful insert/upsert/update/delete calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of a table's rows
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock_tables().get(table).cloned().unwrap_or_default()
    }

    fn lock_tables(&self) -> MutexGuard<'_, HashMap<String, Vec<Value>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn matches_all(filters: &[Filter], row: &Value) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Shallow merge of `patch` object fields into `row`
fn merge_into(row: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(fields)) = (row, patch) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
}

fn same_conflict_key(a: &Value, b: &Value, columns: &[&str]) -> bool {
    columns.iter().all(|c| a.get(*c).is_some() && a.get(*c) == b.get(*c))
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, filters: &[Filter]) -> StoreResult<Vec<Value>> {
        *self
            .selects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table.to_string())
            .or_insert(0) += 1;
        self.check_failure()?;

        Ok(self
            .lock_tables()
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(filters, row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<Vec<Value>> {
        self.check_failure()?;
        if let Some(bad) = rows.iter().find(|r| !r.is_object()) {
            return Err(StoreError::Status {
                status: 400,
                body: format!("row is not an object: {}", bad),
            });
        }
        self.lock_tables()
            .entry(table.to_string())
            .or_default()
            .extend(rows.iter().cloned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows)
    }

    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &[&str],
    ) -> StoreResult<Vec<Value>> {
        self.check_failure()?;
        let mut tables = self.lock_tables();
        let existing = tables.entry(table.to_string()).or_default();
        let mut stored = Vec::with_capacity(rows.len());

        for row in rows {
            match existing
                .iter_mut()
                .find(|current| same_conflict_key(current, &row, on_conflict))
            {
                Some(current) => {
                    merge_into(current, &row);
                    stored.push(current.clone());
                }
                None => {
                    existing.push(row.clone());
                    stored.push(row);
                }
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> StoreResult<Vec<Value>> {
        self.check_failure()?;
        let mut tables = self.lock_tables();
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches_all(filters, row)) {
                merge_into(row, &patch);
                updated.push(row.clone());
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()> {
        self.check_failure()?;
        if let Some(rows) = self.lock_tables().get_mut(table) {
            rows.retain(|row| !matches_all(filters, row));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> MemoryStore {
        MemoryStore::new().with_rows(
            "translations",
            vec![
                json!({"key": "a", "category": "faq", "translations": {"en": "A"}}),
                json!({"key": "b", "category": "press", "translations": {"en": "B"}}),
            ],
        )
    }

    #[tokio::test]
    async fn test_select_applies_filters_and_counts() {
        let store = seeded();
        let rows = store
            .select("translations", &[Filter::is_in("category", &["faq"])])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(store.select_count("translations"), 1);
        assert_eq!(store.select_count("languages"), 0);
    }

    #[tokio::test]
    async fn test_injected_failure_is_returned() {
        let store = seeded();
        store.fail_with(StoreError::Network("down".to_string()));
        assert!(store.select("translations", &[]).await.is_err());

        store.clear_failure();
        assert_eq!(store.select("translations", &[]).await.unwrap().len(), 2);
        assert_eq!(store.select_count("translations"), 2);
    }

    #[tokio::test]
    async fn test_upsert_merges_on_conflict() {
        let store = seeded();
        store
            .upsert(
                "translations",
                vec![
                    json!({"key": "a", "category": "faq", "translations": {"en": "A2"}}),
                    json!({"key": "c", "category": "faq", "translations": {"en": "C"}}),
                ],
                &["key", "category"],
            )
            .await
            .unwrap();

        let rows = store.rows("translations");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["translations"]["en"], "A2");
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = seeded();
        let updated = store
            .update(
                "translations",
                &[Filter::eq("key", "b")],
                json!({"translations": {"en": "B2"}}),
            )
            .await
            .unwrap();
        assert_eq!(updated[0]["translations"]["en"], "B2");

        store
            .delete("translations", &[Filter::eq("key", "a")])
            .await
            .unwrap();
        assert_eq!(store.rows("translations").len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object() {
        let store = MemoryStore::new();
        let err = store
            .insert("translations", vec![json!("scalar")])
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
    }
}
