//! Admin edits to remote translations.
//!
//! Every successful write invalidates the touched namespaces so the next
//! request re-resolves them instead of serving stale text. A failed write
//! leaves the cache alone.

use crate::error::{I18nError, I18nResult, StoreError};
use crate::i18n::{NamespaceLoader, TranslationEntry};
use crate::store::{decode_rows, Filter, RemoteStore, TRANSLATIONS_TABLE};
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

/// Columns identifying one translation entry
const ENTRY_KEY_COLUMNS: [&str; 2] = ["key", "category"];

pub struct TranslationEditor {
    store: Arc<dyn RemoteStore>,
    loader: Arc<NamespaceLoader>,
}

fn entry_filters(key: &str, namespace: &str) -> [Filter; 2] {
    [Filter::eq("key", key), Filter::eq("category", namespace)]
}

fn to_row(entry: &TranslationEntry) -> I18nResult<Value> {
    serde_json::to_value(entry).map_err(|e| I18nError::StoreWrite(StoreError::from(e)))
}

impl TranslationEditor {
    pub fn new(store: Arc<dyn RemoteStore>, loader: Arc<NamespaceLoader>) -> Self {
        Self { store, loader }
    }

    /// Create a new entry
    pub async fn add(&self, entry: &TranslationEntry) -> I18nResult<TranslationEntry> {
        let rows = self
            .store
            .insert(TRANSLATIONS_TABLE, vec![to_row(entry)?])
            .await
            .map_err(|e| self.write_failed("add", e))?;

        self.loader.invalidate(Some(&entry.namespace));
        info!("Added translation {}:{}", entry.namespace, entry.key);

        Ok(decode_rows(rows)
            .ok()
            .and_then(|stored: Vec<TranslationEntry>| stored.into_iter().next())
            .unwrap_or_else(|| entry.clone()))
    }

    /// Replace the per-language values of an existing entry.
    ///
    /// Returns how many rows matched; zero means the entry does not exist.
    pub async fn update(
        &self,
        key: &str,
        namespace: &str,
        values_by_language: &HashMap<String, String>,
    ) -> I18nResult<usize> {
        let patch = json!({ "translations": values_by_language });
        let rows = self
            .store
            .update(TRANSLATIONS_TABLE, &entry_filters(key, namespace), patch)
            .await
            .map_err(|e| self.write_failed("update", e))?;

        self.loader.invalidate(Some(namespace));
        info!(
            "Updated translation {}:{} ({} row(s))",
            namespace,
            key,
            rows.len()
        );
        Ok(rows.len())
    }

    pub async fn delete(&self, key: &str, namespace: &str) -> I18nResult<()> {
        self.store
            .delete(TRANSLATIONS_TABLE, &entry_filters(key, namespace))
            .await
            .map_err(|e| self.write_failed("delete", e))?;

        self.loader.invalidate(Some(namespace));
        info!("Deleted translation {}:{}", namespace, key);
        Ok(())
    }

    /// Insert or replace many entries at once (bulk import).
    ///
    /// Entries are matched on key and namespace. Returns the number of rows
    /// the store reports as written.
    pub async fn upsert_many(&self, entries: &[TranslationEntry]) -> I18nResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let rows = entries.iter().map(to_row).collect::<I18nResult<Vec<_>>>()?;
        let stored = self
            .store
            .upsert(TRANSLATIONS_TABLE, rows, &ENTRY_KEY_COLUMNS)
            .await
            .map_err(|e| self.write_failed("upsert", e))?;

        let namespaces: BTreeSet<&str> = entries.iter().map(|e| e.namespace.as_str()).collect();
        for &ns in &namespaces {
            self.loader.invalidate(Some(ns));
        }
        info!(
            "Upserted {} translation(s) across {} namespace(s)",
            stored.len(),
            namespaces.len()
        );
        Ok(stored.len())
    }

    fn write_failed(&self, operation: &str, error: StoreError) -> I18nError {
        warn!("Translation {} failed: {}", operation, error);
        I18nError::StoreWrite(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::RemoteTranslations;
    use crate::store::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, Arc<NamespaceLoader>, TranslationEditor) {
        let store = Arc::new(MemoryStore::new().with_rows(
            TRANSLATIONS_TABLE,
            vec![json!({"key": "title", "category": "faq", "translations": {"en": "FAQ"}})],
        ));
        let loader = Arc::new(NamespaceLoader::new(RemoteTranslations::new(store.clone())));
        let editor = TranslationEditor::new(store.clone(), loader.clone());
        (store, loader, editor)
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_update_invalidates_namespace() {
        let (store, loader, editor) = setup();
        loader.load("en", &["faq"]).await;
        assert_eq!(loader.lookup("en", "faq", "title").as_deref(), Some("FAQ"));

        let updated = editor
            .update("title", "faq", &values(&[("en", "Questions")]))
            .await
            .unwrap();
        assert_eq!(updated, 1);
        assert!(!loader.table().is_loaded("en", "faq"));

        loader.load("en", &["faq"]).await;
        assert_eq!(store.select_count(TRANSLATIONS_TABLE), 2);
        assert_eq!(
            loader.lookup("en", "faq", "title").as_deref(),
            Some("Questions")
        );
    }

    #[tokio::test]
    async fn test_update_missing_entry_matches_nothing() {
        let (_, _, editor) = setup();
        let updated = editor
            .update("nope", "faq", &values(&[("en", "x")]))
            .await
            .unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn test_add_then_load() {
        let (_, loader, editor) = setup();
        let entry = TranslationEntry::new("empty", "faq").with_value("en", "Nothing yet");

        let stored = editor.add(&entry).await.unwrap();
        assert_eq!(stored, entry);

        loader.load("sq", &["faq"]).await;
        assert_eq!(
            loader.lookup("sq", "faq", "empty").as_deref(),
            Some("Nothing yet")
        );
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (store, loader, editor) = setup();
        loader.load("en", &["faq"]).await;

        editor.delete("title", "faq").await.unwrap();

        assert!(store.rows(TRANSLATIONS_TABLE).is_empty());
        loader.load("en", &["faq"]).await;
        assert_eq!(loader.lookup("en", "faq", "title"), None);
    }

    #[tokio::test]
    async fn test_upsert_many_merges_and_invalidates() {
        let (store, loader, editor) = setup();
        loader.load("en", &["faq"]).await;
        loader.load("en", &["press"]).await;

        let written = editor
            .upsert_many(&[
                TranslationEntry::new("title", "faq").with_value("en", "Help"),
                TranslationEntry::new("title", "press").with_value("en", "Press room"),
            ])
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.rows(TRANSLATIONS_TABLE).len(), 2);
        assert!(!loader.table().is_settled("en", "faq"));
        assert!(!loader.table().is_settled("en", "press"));
    }

    #[tokio::test]
    async fn test_upsert_many_empty_is_noop() {
        let (store, _, editor) = setup();
        assert_eq!(editor.upsert_many(&[]).await.unwrap(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cache() {
        let (store, loader, editor) = setup();
        loader.load("en", &["faq"]).await;
        store.fail_with(StoreError::Status {
            status: 401,
            body: "not an admin".to_string(),
        });

        let err = editor
            .update("title", "faq", &values(&[("en", "x")]))
            .await
            .unwrap_err();

        assert!(matches!(err, I18nError::StoreWrite(StoreError::Status { status: 401, .. })));
        assert!(loader.table().is_loaded("en", "faq"));
    }
}
