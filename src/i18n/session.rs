//! Session-scoped cache of serialized snapshots.
//!
//! Survives loader re-creation within one visit so hot content (namespace
//! tables, the hero translation blob) is not fetched again. Entries expire a
//! fixed TTL after they were written, measured on the injected clock; there
//! is no server-side validation.

use crate::i18n::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Prefix shared by every key this crate writes, for bulk invalidation
pub const SESSION_KEY_PREFIX: &str = "kudosim_";

const NAMESPACE_KEY_PREFIX: &str = "kudosim_translations:";

/// Key under which a resolved namespace table is cached
pub fn namespace_key(language: &str, namespace: &str) -> String {
    format!("{}{}:{}", NAMESPACE_KEY_PREFIX, language, namespace)
}

/// Namespace part of a [`namespace_key`]. Language codes never contain
/// `:`, so everything after the first separator is the namespace.
fn namespace_of(key: &str) -> Option<&str> {
    key.strip_prefix(NAMESPACE_KEY_PREFIX)?
        .split_once(':')
        .map(|(_, namespace)| namespace)
}

#[derive(Debug, Clone)]
struct SessionEntry {
    payload: String,
    stored_at: DateTime<Utc>,
}

pub struct SessionCache {
    entries: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read and decode a fresh entry. Stale entries are dropped.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entry = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries.get(key).cloned()
        }?;

        if now - entry.stored_at >= self.ttl {
            debug!("Session cache entry {} expired", key);
            self.remove(key);
            return None;
        }

        match serde_json::from_str(&entry.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Dropping undecodable session cache entry {}: {}", key, e);
                self.remove(key);
                None
            }
        }
    }

    /// Serialize and store `value`, stamping it with the current time
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Not caching {}: {}", key, e);
                return;
            }
        };

        let entry = SessionEntry {
            payload,
            stored_at: self.clock.now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }

    pub fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Remove every key starting with `prefix`, returning how many went
    pub fn clear_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Remove the cached tables of `namespace` for every language
    pub fn clear_namespace(&self, namespace: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| namespace_of(key) != Some(namespace));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::clock::ManualClock;
    use std::collections::BTreeMap;

    fn cache_with_clock() -> (SessionCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (
            SessionCache::with_clock(Duration::minutes(5), clock.clone()),
            clock,
        )
    }

    #[test]
    fn test_namespace_key_format() {
        assert_eq!(namespace_key("de", "faq"), "kudosim_translations:de:faq");
        assert!(namespace_key("de", "faq").starts_with(SESSION_KEY_PREFIX));
    }

    #[test]
    fn test_set_then_get() {
        let (cache, _) = cache_with_clock();
        let mut hero = BTreeMap::new();
        hero.insert("title".to_string(), "Stay connected".to_string());

        cache.set("kudosim_hero_translations", &hero);

        let cached: Option<BTreeMap<String, String>> = cache.get("kudosim_hero_translations");
        assert_eq!(cached, Some(hero));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.set("kudosim_popup", &"settings");

        clock.advance(Duration::minutes(4));
        assert_eq!(cache.get::<String>("kudosim_popup").as_deref(), Some("settings"));

        clock.advance(Duration::minutes(1));
        assert_eq!(cache.get::<String>("kudosim_popup"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_rewrite_refreshes_timestamp() {
        let (cache, clock) = cache_with_clock();
        cache.set("kudosim_popup", &1u32);
        clock.advance(Duration::minutes(4));
        cache.set("kudosim_popup", &2u32);
        clock.advance(Duration::minutes(4));

        assert_eq!(cache.get::<u32>("kudosim_popup"), Some(2));
    }

    #[test]
    fn test_wrong_type_is_dropped() {
        let (cache, _) = cache_with_clock();
        cache.set("kudosim_popup", &"text");
        assert_eq!(cache.get::<u32>("kudosim_popup"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear_prefix() {
        let (cache, _) = cache_with_clock();
        cache.set("kudosim_a", &1u32);
        cache.set("kudosim_b", &2u32);
        cache.set("other", &3u32);

        assert_eq!(cache.clear_prefix(SESSION_KEY_PREFIX), 2);
        assert_eq!(cache.get::<u32>("other"), Some(3));
    }

    #[test]
    fn test_clear_namespace_hits_all_languages() {
        let (cache, _) = cache_with_clock();
        cache.set(&namespace_key("en", "faq"), &1u32);
        cache.set(&namespace_key("sq", "faq"), &2u32);
        cache.set(&namespace_key("en", "press"), &3u32);

        assert_eq!(cache.clear_namespace("faq"), 2);
        assert_eq!(cache.get::<u32>(&namespace_key("en", "press")), Some(3));
    }

    #[test]
    fn test_clear_namespace_matches_whole_name() {
        let (cache, _) = cache_with_clock();
        cache.set(&namespace_key("en", "faq"), &1u32);
        cache.set(&namespace_key("en", "help:faq"), &2u32);
        cache.set(&namespace_key("fr", "faq:old"), &3u32);

        assert_eq!(cache.clear_namespace("faq"), 1);
        assert_eq!(cache.get::<u32>(&namespace_key("en", "help:faq")), Some(2));
        assert_eq!(cache.get::<u32>(&namespace_key("fr", "faq:old")), Some(3));
    }
}
