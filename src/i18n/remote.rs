//! Remote translation store adapter.
//!
//! Fetches admin-editable translation entries for namespaces that the static
//! bundle does not cover, retrying failures with exponential backoff before
//! giving up.

use crate::error::{I18nError, I18nResult};
use crate::i18n::bundle::NamespaceTable;
use crate::i18n::language::FALLBACK_LANGUAGE;
use crate::retry::{with_retry, RetryConfig};
use crate::store::{decode_rows, Filter, RemoteStore, TRANSLATIONS_TABLE};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One translation key with its value in every language that has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub key: String,

    /// Namespace the key belongs to (stored as `category`)
    #[serde(rename = "category")]
    pub namespace: String,

    /// Language code → translated string (stored as `translations`)
    #[serde(
        rename = "translations",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub values_by_language: HashMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TranslationEntry {
    pub fn new(key: &str, namespace: &str) -> Self {
        Self {
            key: key.to_string(),
            namespace: namespace.to_string(),
            values_by_language: HashMap::new(),
        }
    }

    pub fn with_value(mut self, language: &str, value: &str) -> Self {
        self.values_by_language
            .insert(language.to_string(), value.to_string());
        self
    }

    /// Value for `language`, falling back to English.
    ///
    /// Blank values count as missing so a half-filled admin form does not
    /// blank out text on the site.
    pub fn value_for(&self, language: &str) -> Option<&str> {
        let pick = |code: &str| {
            self.values_by_language
                .get(code)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
        };
        pick(language).or_else(|| pick(FALLBACK_LANGUAGE))
    }
}

/// Project fetched entries onto one language, grouped by namespace.
///
/// Every requested namespace gets a table, empty if the store had nothing
/// for it, so that an absent namespace still counts as resolved.
pub fn tables_for_language(
    entries: &[TranslationEntry],
    language: &str,
    namespaces: &[String],
) -> HashMap<String, NamespaceTable> {
    let mut tables: HashMap<String, NamespaceTable> = namespaces
        .iter()
        .map(|ns| (ns.clone(), NamespaceTable::new()))
        .collect();

    for entry in entries {
        let Some(table) = tables.get_mut(&entry.namespace) else {
            continue;
        };
        if let Some(value) = entry.value_for(language) {
            table.insert(entry.key.clone(), value.to_string());
        }
    }

    tables
}

/// Reads translation entries from the remote store.
#[derive(Clone)]
pub struct RemoteTranslations {
    store: Arc<dyn RemoteStore>,
    retry: RetryConfig,
}

impl RemoteTranslations {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            retry: RetryConfig::remote_fetch(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch every entry whose namespace is in `namespaces`.
    ///
    /// Any failure, including rejected requests and undecodable rows, is
    /// retried per the configured policy; once the attempts are used up the
    /// last store error is returned as [`I18nError::RemoteFetch`].
    pub async fn fetch_translations(
        &self,
        namespaces: &[String],
    ) -> I18nResult<Vec<TranslationEntry>> {
        if namespaces.is_empty() {
            return Ok(Vec::new());
        }

        let filters = [Filter::is_in("category", namespaces)];
        let label = format!("Translation fetch [{}]", namespaces.join(", "));
        let store = &self.store;
        let filters = &filters;

        let entries = with_retry(&self.retry, &label, move || async move {
            store
                .select(TRANSLATIONS_TABLE, filters)
                .await
                .and_then(decode_rows::<TranslationEntry>)
        })
        .await
        .map_err(|source| I18nError::RemoteFetch {
            namespaces: namespaces.to_vec(),
            source,
        })?;
        debug!("{}: {} entries", label, entries.len());

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::time::Duration;

    fn namespaces(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn seeded_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new().with_rows(
            TRANSLATIONS_TABLE,
            vec![
                json!({"key": "faq.title", "category": "faq",
                       "translations": {"en": "Frequently asked questions", "sq": "Pyetje të shpeshta"}}),
                json!({"key": "faq.empty", "category": "faq", "translations": {"en": "No questions yet"}}),
                json!({"key": "press.title", "category": "press", "translations": {"en": "Press"}}),
                json!({"key": "hero.title", "category": "hero", "translations": null}),
            ],
        ))
    }

    // ==================== TranslationEntry Tests ====================

    #[test]
    fn test_value_for_prefers_requested_language() {
        let entry = TranslationEntry::new("k", "faq")
            .with_value("en", "Hello")
            .with_value("fr", "Bonjour");
        assert_eq!(entry.value_for("fr"), Some("Bonjour"));
    }

    #[test]
    fn test_value_for_falls_back_to_english() {
        let entry = TranslationEntry::new("k", "faq").with_value("en", "Hello");
        assert_eq!(entry.value_for("mk"), Some("Hello"));
    }

    #[test]
    fn test_value_for_blank_counts_as_missing() {
        let entry = TranslationEntry::new("k", "faq")
            .with_value("en", "Hello")
            .with_value("de", "  ");
        assert_eq!(entry.value_for("de"), Some("Hello"));
    }

    #[test]
    fn test_value_for_no_english() {
        let entry = TranslationEntry::new("k", "faq").with_value("sq", "Përshëndetje");
        assert_eq!(entry.value_for("fr"), None);
    }

    #[test]
    fn test_entry_deserializes_null_translations() {
        let entry: TranslationEntry =
            serde_json::from_value(json!({"key": "a", "category": "b", "translations": null}))
                .unwrap();
        assert!(entry.values_by_language.is_empty());
    }

    #[test]
    fn test_tables_for_language_groups_and_falls_back() {
        let entries = vec![
            TranslationEntry::new("title", "faq")
                .with_value("en", "FAQ")
                .with_value("sq", "Pyetje"),
            TranslationEntry::new("empty", "faq").with_value("en", "Nothing here"),
            TranslationEntry::new("title", "press").with_value("en", "Press"),
        ];

        let tables = tables_for_language(&entries, "sq", &namespaces(&["faq", "about"]));

        assert_eq!(tables.len(), 2);
        assert_eq!(tables["faq"]["title"], "Pyetje");
        assert_eq!(tables["faq"]["empty"], "Nothing here");
        assert!(tables["about"].is_empty());
        assert!(!tables.contains_key("press"));
    }

    // ==================== Fetch Tests ====================

    #[tokio::test]
    async fn test_fetch_filters_by_namespace() {
        let store = seeded_store();
        let remote = RemoteTranslations::new(store.clone());

        let entries = remote
            .fetch_translations(&namespaces(&["faq"]))
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.namespace == "faq"));
        assert_eq!(store.select_count(TRANSLATIONS_TABLE), 1);
    }

    #[tokio::test]
    async fn test_fetch_empty_request_skips_store() {
        let store = seeded_store();
        let remote = RemoteTranslations::new(store.clone());

        let entries = remote.fetch_translations(&[]).await.unwrap();

        assert!(entries.is_empty());
        assert_eq!(store.select_count(TRANSLATIONS_TABLE), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_retries_four_times_then_fails() {
        let store = seeded_store();
        store.fail_with(StoreError::Status {
            status: 503,
            body: "unavailable".to_string(),
        });
        let remote = RemoteTranslations::new(store.clone());
        let start = tokio::time::Instant::now();

        let err = remote
            .fetch_translations(&namespaces(&["faq"]))
            .await
            .unwrap_err();

        assert!(matches!(err, I18nError::RemoteFetch { .. }));
        assert_eq!(store.select_count(TRANSLATIONS_TABLE), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_retries_rejected_requests_too() {
        let store = seeded_store();
        store.fail_with(StoreError::Status {
            status: 403,
            body: "rls".to_string(),
        });
        let remote = RemoteTranslations::new(store.clone());

        let err = remote
            .fetch_translations(&namespaces(&["faq"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            I18nError::RemoteFetch {
                source: StoreError::Status { status: 403, .. },
                ..
            }
        ));
        assert_eq!(store.select_count(TRANSLATIONS_TABLE), 4);
    }

    #[tokio::test]
    async fn test_fetch_recovers_after_failure_clears() {
        let store = seeded_store();
        store.fail_with(StoreError::Network("offline".to_string()));
        let remote = RemoteTranslations::new(store.clone())
            .with_retry_config(RetryConfig::new(1, Duration::from_millis(1)));

        assert!(remote.fetch_translations(&namespaces(&["faq"])).await.is_err());
        store.clear_failure();
        assert_eq!(
            remote
                .fetch_translations(&namespaces(&["faq"]))
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_fetch_malformed_rows_is_remote_error() {
        let store = Arc::new(
            MemoryStore::new().with_rows(TRANSLATIONS_TABLE, vec![json!({"category": "faq"})]),
        );
        let remote = RemoteTranslations::new(store)
            .with_retry_config(RetryConfig::new(1, Duration::from_millis(1)));

        let err = remote
            .fetch_translations(&namespaces(&["faq"]))
            .await
            .unwrap_err();
        match err {
            I18nError::RemoteFetch { namespaces, source } => {
                assert_eq!(namespaces, vec!["faq".to_string()]);
                assert!(matches!(source, StoreError::Decode(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
