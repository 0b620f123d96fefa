//! Resolved resource table: (language, namespace) → key → string.
//!
//! Shared by every caller in the process. Writes only ever add keys;
//! the one destructive operation is [`ResourceTable::invalidate`].

use crate::i18n::bundle::NamespaceTable;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

type BundleKey = (String, String);

fn bundle_key(language: &str, namespace: &str) -> BundleKey {
    (language.to_string(), namespace.to_string())
}

#[derive(Debug, Default)]
pub struct ResourceTable {
    bundles: RwLock<HashMap<BundleKey, NamespaceTable>>,
    /// Pairs whose remote load failed; not retried until invalidated
    attempted: RwLock<HashSet<BundleKey>>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A namespace has content for this language
    pub fn is_loaded(&self, language: &str, namespace: &str) -> bool {
        self.bundles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&bundle_key(language, namespace))
    }

    /// A namespace needs no further loading this session: either loaded
    /// or already attempted and failed
    pub fn is_settled(&self, language: &str, namespace: &str) -> bool {
        self.is_loaded(language, namespace)
            || self
                .attempted
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&bundle_key(language, namespace))
    }

    /// Add keys to a bundle, creating it if needed. Existing keys are
    /// overwritten by the incoming values.
    pub fn merge(&self, language: &str, namespace: &str, table: NamespaceTable) {
        self.bundles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(bundle_key(language, namespace))
            .or_default()
            .extend(table);
    }

    pub fn mark_attempted(&self, language: &str, namespace: &str) {
        self.attempted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(bundle_key(language, namespace));
    }

    pub fn get(&self, language: &str, namespace: &str, key: &str) -> Option<String> {
        self.bundles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&bundle_key(language, namespace))
            .and_then(|table| table.get(key).cloned())
    }

    /// Copy of one bundle
    pub fn namespace(&self, language: &str, namespace: &str) -> Option<NamespaceTable> {
        self.bundles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&bundle_key(language, namespace))
            .cloned()
    }

    /// Namespaces loaded for a language
    pub fn loaded_namespaces(&self, language: &str) -> BTreeSet<String> {
        self.bundles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|(lang, _)| lang == language)
            .map(|(_, ns)| ns.clone())
            .collect()
    }

    /// Forget a namespace in every language, or everything with `None`.
    ///
    /// Returns the number of bundles dropped.
    pub fn invalidate(&self, namespace: Option<&str>) -> usize {
        let keep = |key: &BundleKey| namespace.is_some_and(|ns| key.1 != ns);

        let mut bundles = self.bundles.write().unwrap_or_else(PoisonError::into_inner);
        let before = bundles.len();
        bundles.retain(|key, _| keep(key));
        let dropped = before - bundles.len();
        drop(bundles);

        self.attempted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|key| keep(key));

        dropped
    }
}
