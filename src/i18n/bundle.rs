//! Static resource bundle: translations compiled into the binary.
//!
//! This is the fast path of namespace loading. It never touches the network
//! and never changes at runtime.

use crate::i18n::resources::{Table, RESOURCES};
use std::collections::{BTreeSet, HashMap};

/// Namespace → key → string, as merged into the resource table
pub type NamespaceTable = HashMap<String, String>;

#[derive(Debug, Clone, Copy)]
pub struct StaticBundle {
    resources: &'static [(&'static str, &'static str, Table)],
}

impl StaticBundle {
    /// Bundle backed by the embedded core namespaces
    pub fn embedded() -> Self {
        Self {
            resources: RESOURCES,
        }
    }

    /// Bundle backed by caller-provided tables
    pub fn from_resources(resources: &'static [(&'static str, &'static str, Table)]) -> Self {
        Self { resources }
    }

    /// Bundle with no content; every namespace goes to the remote store
    pub fn empty() -> Self {
        Self { resources: &[] }
    }

    fn table(&self, language: &str, namespace: &str) -> Option<Table> {
        self.resources
            .iter()
            .find(|(lang, ns, _)| *lang == language && *ns == namespace)
            .map(|(_, _, table)| *table)
    }

    pub fn has_namespace(&self, language: &str, namespace: &str) -> bool {
        self.table(language, namespace).is_some()
    }

    pub fn get_namespace(&self, language: &str, namespace: &str) -> Option<NamespaceTable> {
        self.table(language, namespace).map(|table| {
            table
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect()
        })
    }

    /// Single key lookup without materializing the table
    pub fn lookup(&self, language: &str, namespace: &str, key: &str) -> Option<&'static str> {
        self.table(language, namespace)?
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Namespaces embedded for at least one language
    pub fn namespaces(&self) -> BTreeSet<&'static str> {
        self.resources.iter().map(|(_, ns, _)| *ns).collect()
    }

    /// Languages with at least one embedded namespace
    pub fn languages(&self) -> BTreeSet<&'static str> {
        self.resources.iter().map(|(lang, _, _)| *lang).collect()
    }
}

impl Default for StaticBundle {
    fn default() -> Self {
        Self::embedded()
    }
}
