//! Language registry: the set of languages the storefront offers.
//!
//! Loaded once at startup from the `languages` table. When the table cannot
//! be read (or is empty) the registry falls back to a built-in list of five
//! languages, so callers always get a non-empty registry.

use crate::error::{I18nError, I18nResult};
use crate::i18n::language::{Language, FALLBACK_LANGUAGE};
use crate::retry::{with_retry_if, RetryConfig};
use crate::store::{decode_rows, Filter, RemoteStore, LANGUAGES_TABLE};
use tracing::{info, warn};

/// Read-only list of supported languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    /// Build a registry from an explicit list.
    ///
    /// An empty list is replaced by the built-in fallback languages.
    pub fn new(languages: Vec<Language>) -> Self {
        if languages.is_empty() {
            return Self::fallback();
        }

        let defaults = languages.iter().filter(|l| l.is_default).count();
        if defaults != 1 {
            warn!(
                "Language registry has {} default languages, expected exactly one; using '{}'",
                defaults, FALLBACK_LANGUAGE
            );
        }

        Self { languages }
    }

    /// Built-in registry used when the store is unavailable
    pub fn fallback() -> Self {
        Self {
            languages: fallback_languages(),
        }
    }

    /// Load languages from the store, never failing.
    ///
    /// Store errors and empty tables are logged and replaced by
    /// [`LanguageRegistry::fallback`].
    pub async fn load(store: &dyn RemoteStore, retry: &RetryConfig) -> Self {
        match Self::try_load(store, retry).await {
            Ok(registry) => registry,
            Err(e) => {
                warn!("{}; using built-in language list", e);
                Self::fallback()
            }
        }
    }

    /// Load languages from the store, reporting failures to the caller
    pub async fn try_load(store: &dyn RemoteStore, retry: &RetryConfig) -> I18nResult<Self> {
        let no_filters: [Filter; 0] = [];
        let rows = with_retry_if(
            retry,
            "Language registry load",
            || store.select(LANGUAGES_TABLE, &no_filters),
            |e| e.is_retryable(),
        )
        .await
        .map_err(I18nError::RegistryLoad)?;

        let languages: Vec<Language> = decode_rows(rows).map_err(I18nError::RegistryLoad)?;
        info!("Loaded {} languages from store", languages.len());

        Ok(Self::new(languages))
    }

    /// Get a language by its code
    pub fn get_by_code(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Check if a language code is offered
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All languages in registry order
    pub fn list_all(&self) -> &[Language] {
        &self.languages
    }

    /// Code used when the visitor has no valid preference.
    ///
    /// Exactly one language flagged default wins; zero or several flagged
    /// languages resolve to `"en"`.
    pub fn default_code(&self) -> &str {
        let mut defaults = self.languages.iter().filter(|l| l.is_default);
        match (defaults.next(), defaults.next()) {
            (Some(only), None) => &only.code,
            _ => FALLBACK_LANGUAGE,
        }
    }

    /// Pick the active language from a persisted preference.
    ///
    /// The preference wins when it names a registered language; otherwise
    /// the default is used.
    pub fn resolve_active(&self, persisted: Option<&str>) -> String {
        match persisted {
            Some(code) if self.contains(code) => code.to_string(),
            _ => self.default_code().to_string(),
        }
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Built-in language list.
///
/// English, Albanian, French, German and Turkish; English is the default.
fn fallback_languages() -> Vec<Language> {
    vec![
        Language::new("en", "English", "gb", true),
        Language::new("sq", "Shqip", "al", false),
        Language::new("fr", "Français", "fr", false),
        Language::new("de", "Deutsch", "de", false),
        Language::new("tr", "Türkçe", "tr", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::time::Duration;

    fn quick_retry() -> RetryConfig {
        RetryConfig::new(2, Duration::from_millis(1))
    }

    #[test]
    fn test_fallback_has_five_distinct_languages() {
        let registry = LanguageRegistry::fallback();
        let codes: Vec<&str> = registry.list_all().iter().map(|l| l.code.as_str()).collect();

        assert_eq!(codes, vec!["en", "sq", "fr", "de", "tr"]);

        let mut flags: Vec<&str> = registry
            .list_all()
            .iter()
            .map(|l| l.flag_identifier.as_str())
            .collect();
        flags.sort_unstable();
        flags.dedup();
        assert_eq!(flags.len(), 5);
    }

    #[test]
    fn test_fallback_default_is_english() {
        assert_eq!(LanguageRegistry::fallback().default_code(), "en");
    }

    #[test]
    fn test_empty_list_uses_fallback() {
        assert_eq!(LanguageRegistry::new(vec![]), LanguageRegistry::fallback());
    }

    #[test]
    fn test_single_default_wins() {
        let registry = LanguageRegistry::new(vec![
            Language::new("en", "English", "gb", false),
            Language::new("sq", "Shqip", "al", true),
        ]);
        assert_eq!(registry.default_code(), "sq");
    }

    #[test]
    fn test_no_default_resolves_to_english() {
        let registry = LanguageRegistry::new(vec![
            Language::new("fr", "Français", "fr", false),
            Language::new("de", "Deutsch", "de", false),
        ]);
        assert_eq!(registry.default_code(), "en");
    }

    #[test]
    fn test_multiple_defaults_resolve_to_english() {
        let registry = LanguageRegistry::new(vec![
            Language::new("fr", "Français", "fr", true),
            Language::new("de", "Deutsch", "de", true),
        ]);
        assert_eq!(registry.default_code(), "en");
    }

    #[test]
    fn test_resolve_active_prefers_valid_preference() {
        let registry = LanguageRegistry::fallback();
        assert_eq!(registry.resolve_active(Some("de")), "de");
    }

    #[test]
    fn test_resolve_active_ignores_unknown_preference() {
        let registry = LanguageRegistry::fallback();
        assert_eq!(registry.resolve_active(Some("xx")), "en");
        assert_eq!(registry.resolve_active(None), "en");
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = MemoryStore::new().with_rows(
            LANGUAGES_TABLE,
            vec![
                json!({"code": "en", "name": "English", "flag": "gb", "is_default": false}),
                json!({"code": "mk", "name": "Македонски", "flag": "mk", "is_default": true}),
            ],
        );

        let registry = LanguageRegistry::load(&store, &quick_retry()).await;

        assert_eq!(registry.list_all().len(), 2);
        assert!(registry.contains("mk"));
        assert_eq!(registry.default_code(), "mk");
    }

    #[tokio::test]
    async fn test_load_failure_falls_back() {
        let store = MemoryStore::new();
        store.fail_with(StoreError::Network("offline".to_string()));

        let registry = LanguageRegistry::load(&store, &quick_retry()).await;

        assert_eq!(registry, LanguageRegistry::fallback());
        assert_eq!(store.select_count(LANGUAGES_TABLE), 2);
    }

    #[tokio::test]
    async fn test_try_load_surfaces_registry_error() {
        let store = MemoryStore::new();
        store.fail_with(StoreError::Status {
            status: 401,
            body: "no key".to_string(),
        });

        let result = LanguageRegistry::try_load(&store, &quick_retry()).await;

        assert!(matches!(result, Err(I18nError::RegistryLoad(_))));
        // 401 is not retryable
        assert_eq!(store.select_count(LANGUAGES_TABLE), 1);
    }

    #[tokio::test]
    async fn test_load_malformed_rows_falls_back() {
        let store = MemoryStore::new().with_rows(LANGUAGES_TABLE, vec![json!({"code": 5})]);
        let registry = LanguageRegistry::load(&store, &quick_retry()).await;
        assert_eq!(registry, LanguageRegistry::fallback());
    }

    #[tokio::test]
    async fn test_load_empty_table_falls_back() {
        let store = MemoryStore::new().with_rows(LANGUAGES_TABLE, vec![]);
        let registry = LanguageRegistry::load(&store, &quick_retry()).await;
        assert_eq!(registry, LanguageRegistry::fallback());
    }
}
