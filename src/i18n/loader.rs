//! Namespace loader: makes requested namespaces available for a language.
//!
//! Each request walks the same phases:
//!
//! 1. `Checking` - drop namespaces already settled in the resource table
//! 2. `LoadingStatic` - serve what the static bundle has, then what the
//!    session cache still holds from an earlier load
//! 3. `LoadingRemote` - fetch whatever is left from the remote store
//! 4. `Done` - loading is reported complete whether or not the remote
//!    fetch succeeded
//!
//! The static bundle is always consulted before the network. A failed remote
//! fetch marks its namespaces as attempted so they are not retried until the
//! cache is invalidated, and the error is handed back as a value. A remote
//! result that lands after an invalidation is discarded.

use crate::error::I18nError;
use crate::i18n::bundle::{NamespaceTable, StaticBundle};
use crate::i18n::language::FALLBACK_LANGUAGE;
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::remote::{tables_for_language, RemoteTranslations};
use crate::i18n::session::{namespace_key, SessionCache, SESSION_KEY_PREFIX};
use crate::i18n::table::ResourceTable;
use chrono::Duration;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Default lifetime of session cache snapshots
pub const DEFAULT_SESSION_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Checking,
    LoadingStatic,
    LoadingRemote,
    Done,
}

/// Loading state observable through [`NamespaceLoader::subscribe`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState {
    pub phase: LoadPhase,
    pub is_loading: bool,
    pub error: Option<I18nError>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            is_loading: false,
            error: None,
        }
    }
}

/// Outcome of one namespace request
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceStatus {
    /// Always `false` once the request has returned
    pub is_loading: bool,

    /// Requested namespaces that now have content for the language
    pub loaded_namespaces: Vec<String>,

    /// Remote failure, if any; rendering proceeds regardless
    pub error: Option<I18nError>,
}

pub struct NamespaceLoader {
    bundle: StaticBundle,
    remote: RemoteTranslations,
    table: Arc<ResourceTable>,
    session: Arc<SessionCache>,
    metrics: Arc<TranslationMetrics>,
    /// Every namespace requested so far; re-resolved on language change
    mounted: RwLock<BTreeSet<String>>,
    in_flight: AtomicUsize,
    /// Bumped by every invalidation
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
}

/// Marks one request in flight; dropping it (even mid-load) ends the request
struct LoadGuard<'a> {
    loader: &'a NamespaceLoader,
    error: Option<I18nError>,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.loader.finish(self.error.take());
    }
}

impl NamespaceLoader {
    pub fn new(remote: RemoteTranslations) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            bundle: StaticBundle::embedded(),
            remote,
            table: Arc::new(ResourceTable::new()),
            session: Arc::new(SessionCache::new(Duration::seconds(
                DEFAULT_SESSION_TTL_SECS,
            ))),
            metrics: Arc::new(TranslationMetrics::new()),
            mounted: RwLock::new(BTreeSet::new()),
            in_flight: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn with_bundle(mut self, bundle: StaticBundle) -> Self {
        self.bundle = bundle;
        self
    }

    /// Share a resource table with other loaders
    pub fn with_table(mut self, table: Arc<ResourceTable>) -> Self {
        self.table = table;
        self
    }

    /// Share a session cache with other loaders
    pub fn with_session_cache(mut self, session: Arc<SessionCache>) -> Self {
        self.session = session;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<TranslationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn bundle(&self) -> &StaticBundle {
        &self.bundle
    }

    pub fn table(&self) -> &Arc<ResourceTable> {
        &self.table
    }

    pub fn session(&self) -> &Arc<SessionCache> {
        &self.session
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    /// Watch loading state across all requests on this loader
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Namespaces requested so far, in name order
    pub fn mounted_namespaces(&self) -> Vec<String> {
        self.mounted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Make `namespaces` available for `language`.
    ///
    /// Never fails: a remote error is returned inside the status and the
    /// affected namespaces fall back to static content and caller defaults.
    pub async fn load<S: AsRef<str>>(&self, language: &str, namespaces: &[S]) -> NamespaceStatus {
        let mut requested: Vec<String> = Vec::with_capacity(namespaces.len());
        for ns in namespaces {
            let ns = ns.as_ref();
            if !ns.is_empty() && !requested.iter().any(|r| r == ns) {
                requested.push(ns.to_string());
            }
        }

        self.mounted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(requested.iter().cloned());

        let mut guard = self.begin();
        let error = self.resolve(language, &requested).await;
        guard.error = error.clone();
        drop(guard);

        NamespaceStatus {
            is_loading: false,
            loaded_namespaces: requested
                .iter()
                .filter(|ns| self.table.is_loaded(language, ns))
                .cloned()
                .collect(),
            error,
        }
    }

    /// Re-run every mounted namespace for a (new) language in one pass
    pub async fn reload_mounted(&self, language: &str) -> NamespaceStatus {
        let mounted = self.mounted_namespaces();
        self.set_phase(LoadPhase::Idle);
        debug!(
            "Re-resolving {} mounted namespace(s) for '{}'",
            mounted.len(),
            language
        );
        self.load(language, mounted.as_slice()).await
    }

    async fn resolve(&self, language: &str, requested: &[String]) -> Option<I18nError> {
        self.set_phase(LoadPhase::Checking);
        let missing: Vec<&String> = requested
            .iter()
            .filter(|ns| {
                let settled = self.table.is_settled(language, ns);
                if settled {
                    self.metrics.record_cache_hit();
                }
                !settled
            })
            .collect();

        if missing.is_empty() {
            debug!("All namespaces already resolved for '{}'", language);
            return None;
        }

        self.set_phase(LoadPhase::LoadingStatic);
        let mut remote_needed: Vec<String> = Vec::new();
        for ns in missing {
            if let Some(table) = self.bundle.get_namespace(language, ns) {
                self.metrics.record_static_hit();
                self.table.merge(language, ns, table);
            } else if let Some(table) = self
                .session
                .get::<NamespaceTable>(&namespace_key(language, ns))
            {
                self.metrics.record_session_hit();
                self.table.merge(language, ns, table);
            } else {
                remote_needed.push(ns.clone());
            }
        }

        if remote_needed.is_empty() {
            return None;
        }

        self.set_phase(LoadPhase::LoadingRemote);
        self.metrics.record_remote_fetch();
        let generation = self.generation.load(Ordering::SeqCst);
        let result = self.remote.fetch_translations(&remote_needed).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                "Discarding remote result for [{}]: cache invalidated during fetch",
                remote_needed.join(", ")
            );
            return result.err();
        }

        match result {
            Ok(entries) => {
                for (ns, table) in tables_for_language(&entries, language, &remote_needed) {
                    self.session.set(&namespace_key(language, &ns), &table);
                    self.table.merge(language, &ns, table);
                }
                info!(
                    "Loaded [{}] for '{}' from remote store ({} entries)",
                    remote_needed.join(", "),
                    language,
                    entries.len()
                );
                None
            }
            Err(e) => {
                self.metrics.record_remote_failure();
                warn!("{}; rendering with fallback strings", e);
                for ns in &remote_needed {
                    self.table.mark_attempted(language, ns);
                }
                Some(e)
            }
        }
    }

    /// Resolve a key for a language: the language's own table, then its
    /// static bundle, then the same two for English.
    pub fn lookup(&self, language: &str, namespace: &str, key: &str) -> Option<String> {
        let mut chain = vec![language];
        if language != FALLBACK_LANGUAGE {
            chain.push(FALLBACK_LANGUAGE);
        }

        chain.into_iter().find_map(|lang| {
            self.table
                .get(lang, namespace, key)
                .or_else(|| self.bundle.lookup(lang, namespace, key).map(str::to_string))
        })
    }

    /// Drop cached translations so the next request re-resolves them.
    ///
    /// `Some(ns)` clears that namespace in every language; `None` clears
    /// everything this crate cached. Returns the number of table bundles
    /// dropped.
    pub fn invalidate(&self, namespace: Option<&str>) -> usize {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let dropped = self.table.invalidate(namespace);
        let cleared = match namespace {
            Some(ns) => self.session.clear_namespace(ns),
            None => self.session.clear_prefix(SESSION_KEY_PREFIX),
        };
        info!(
            "Invalidated {} ({} table bundles, {} session entries)",
            namespace.unwrap_or("all namespaces"),
            dropped,
            cleared
        );
        dropped
    }

    fn set_phase(&self, phase: LoadPhase) {
        debug!("Namespace loader phase: {:?}", phase);
        self.state.send_modify(|state| state.phase = phase);
    }

    fn begin(&self) -> LoadGuard<'_> {
        let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.is_loading = true;
            if previous == 0 {
                state.error = None;
            }
        });
        LoadGuard {
            loader: self,
            error: None,
        }
    }

    fn finish(&self, error: Option<I18nError>) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        self.state.send_modify(|state| {
            if error.is_some() {
                state.error = error;
            }
            if remaining == 0 {
                state.is_loading = false;
                state.phase = LoadPhase::Done;
            }
        });
    }
}
