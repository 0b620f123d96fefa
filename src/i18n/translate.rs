//! Key lookup for rendering surfaces.
//!
//! A missing key is not an error: it renders as the caller's default value,
//! or as the key itself when no default was given.

use crate::i18n::loader::NamespaceLoader;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Matches `{{name}}` placeholders, tolerating inner whitespace
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Replace `{{name}}` placeholders with values; unknown names stay verbatim.
pub fn interpolate(template: &str, values: &BTreeMap<String, String>) -> String {
    if values.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    placeholder_pattern()
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Per-call lookup options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Rendered when the key is absent from every source
    pub default_value: Option<String>,

    /// Placeholder values
    pub values: BTreeMap<String, String>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }

    pub fn with_value(mut self, name: &str, value: impl ToString) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

/// Translation function bound to one language and namespace.
pub struct Translator<'a> {
    loader: &'a NamespaceLoader,
    language: String,
    namespace: String,
}

impl<'a> Translator<'a> {
    pub fn new(loader: &'a NamespaceLoader, language: &str, namespace: &str) -> Self {
        Self {
            loader,
            language: language.to_string(),
            namespace: namespace.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &TranslateOptions::default())
    }

    /// Look up `key`, falling back to `options.default_value`, then the key.
    ///
    /// `other:key` looks in namespace `other` instead of the bound one; a
    /// miss renders the bare `key`.
    pub fn t_with(&self, key: &str, options: &TranslateOptions) -> String {
        let (namespace, bare_key) = match key.split_once(':') {
            Some((ns, rest)) if !ns.is_empty() && !rest.is_empty() => (ns, rest),
            _ => (self.namespace.as_str(), key),
        };

        let template = self
            .loader
            .lookup(&self.language, namespace, bare_key)
            .or_else(|| options.default_value.clone())
            .unwrap_or_else(|| bare_key.to_string());

        interpolate(&template, &options.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::remote::RemoteTranslations;
    use crate::store::MemoryStore;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn loader() -> NamespaceLoader {
        NamespaceLoader::new(RemoteTranslations::new(Arc::new(MemoryStore::new())))
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_interpolate_replaces_placeholders() {
        assert_eq!(
            interpolate("{{count}} days", &values(&[("count", "30")])),
            "30 days"
        );
    }

    #[test]
    fn test_interpolate_tolerates_whitespace() {
        assert_eq!(
            interpolate("Hi {{ name }}!", &values(&[("name", "Ana")])),
            "Hi Ana!"
        );
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        assert_eq!(
            interpolate("{{a}} and {{b}}", &values(&[("a", "1")])),
            "1 and {{b}}"
        );
    }

    #[test]
    fn test_interpolate_no_values() {
        assert_eq!(interpolate("{{a}}", &BTreeMap::new()), "{{a}}");
    }

    proptest! {
        #[test]
        fn prop_interpolate_without_braces_is_identity(s in "[^{}]*", v in "[a-z]{0,8}") {
            prop_assert_eq!(interpolate(&s, &values(&[("x", v.as_str())])), s);
        }
    }

    // ==================== Translator Tests ====================

    #[tokio::test]
    async fn test_t_uses_loaded_language() {
        let loader = loader();
        loader.load("de", &["package"]).await;

        let t = Translator::new(&loader, "de", "package");
        assert_eq!(t.t("valid.for"), "Gültig für");
        assert_eq!(
            t.t_with("days", &TranslateOptions::new().with_value("count", 7)),
            "7 Tage"
        );
    }

    #[test]
    fn test_t_missing_key_returns_key() {
        let loader = loader();
        let t = Translator::new(&loader, "fr", "popup");
        assert_eq!(t.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_t_missing_key_returns_default() {
        let loader = loader();
        let t = Translator::new(&loader, "fr", "faq");
        let options = TranslateOptions::new().with_default("Questions");
        assert_eq!(t.t_with("title", &options), "Questions");
    }

    #[test]
    fn test_t_default_is_interpolated() {
        let loader = loader();
        let t = Translator::new(&loader, "en", "faq");
        let options = TranslateOptions::new()
            .with_default("{{n}} questions")
            .with_value("n", 3);
        assert_eq!(t.t_with("count", &options), "3 questions");
    }

    #[test]
    fn test_t_namespace_prefix() {
        let loader = loader();
        let t = Translator::new(&loader, "en", "faq");
        // Static bundle answers even before a load
        assert_eq!(t.t("common:nav.home"), "Home");
    }

    #[test]
    fn test_t_namespace_prefix_miss_renders_bare_key() {
        let loader = loader();
        let t = Translator::new(&loader, "sq", "faq");
        assert_eq!(t.t("common:nav.missing"), "nav.missing");
    }

    #[test]
    fn test_t_unloaded_language_uses_english_static() {
        let loader = loader();
        let t = Translator::new(&loader, "mk", "common");
        assert_eq!(t.t("nav.contact"), "Contact");
    }
}
