//! Internationalization (i18n) module for the storefront.
//!
//! Resolves which language is active, makes translation namespaces available
//! for it, and answers key lookups with graceful fallback.
//!
//! # Architecture
//!
//! - `registry`: Supported languages, loaded from the store with a built-in fallback
//! - `language`: The `Language` record
//! - `preference`: Durable storage for the visitor's language choice
//! - `bundle` / `resources`: Translations compiled into the binary
//! - `remote`: Admin-editable translations fetched from the store, with retry
//! - `table`: Resolved (language, namespace) tables shared by all callers
//! - `session`: TTL cache that outlives a single loader
//! - `loader`: Namespace loading state machine (static first, then remote)
//! - `translate`: `t(key)` with default values and `{{var}}` interpolation
//! - `metrics`: Cache and remote fetch counters
//!
//! # Example
//!
//! ```rust,ignore
//! use kudosim_i18n::i18n::{I18n, MemoryPreferenceStore};
//!
//! let i18n = I18n::connect(store, Arc::new(MemoryPreferenceStore::new()), ttl).await;
//! i18n.use_namespaces(&["common", "package"]).await;
//!
//! let t = i18n.translator("package");
//! println!("{}", t.t("valid.for"));
//! ```

mod bundle;
mod clock;
mod language;
mod loader;
mod metrics;
mod preference;
mod registry;
mod remote;
mod resources;
mod session;
mod table;
mod translate;

pub use bundle::{NamespaceTable, StaticBundle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use language::{Language, FALLBACK_LANGUAGE};
pub use loader::{LoadPhase, LoadState, NamespaceLoader, NamespaceStatus, DEFAULT_SESSION_TTL_SECS};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preference::{
    language_preference_max_age, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    LANGUAGE_PREFERENCE_KEY,
};
pub use registry::LanguageRegistry;
pub use remote::{tables_for_language, RemoteTranslations, TranslationEntry};
pub use session::{namespace_key, SessionCache, SESSION_KEY_PREFIX};
pub use table::ResourceTable;
pub use translate::{interpolate, TranslateOptions, Translator};

use crate::retry::RetryConfig;
use crate::store::RemoteStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Why a language change request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Code is not in the registry
    UnknownLanguage,
    /// Code is already the active language
    AlreadyActive,
    /// Another switch has not finished yet
    SwitchInProgress,
}

/// Result of [`I18n::set_active_language`]
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageChange {
    /// Language switched; `status` covers the re-resolved namespaces
    Applied { status: NamespaceStatus },
    Ignored(IgnoreReason),
}

impl LanguageChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, LanguageChange::Applied { .. })
    }
}

/// Clears the in-flight flag even if the switch future is dropped
struct SwitchGuard<'a>(&'a AtomicBool);

impl Drop for SwitchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Process-wide i18n state: registry, active language and loader.
pub struct I18n {
    registry: LanguageRegistry,
    preferences: Arc<dyn PreferenceStore>,
    loader: Arc<NamespaceLoader>,
    active: RwLock<String>,
    switching: AtomicBool,
}

impl I18n {
    /// Build from parts, picking the active language from the persisted
    /// preference or the registry default.
    pub fn new(
        registry: LanguageRegistry,
        preferences: Arc<dyn PreferenceStore>,
        loader: Arc<NamespaceLoader>,
    ) -> Self {
        let persisted = preferences.get(LANGUAGE_PREFERENCE_KEY);
        let active = registry.resolve_active(persisted.as_deref());
        info!(
            "Active language '{}' (persisted: {})",
            active,
            persisted.as_deref().unwrap_or("none")
        );

        Self {
            registry,
            preferences,
            loader,
            active: RwLock::new(active),
            switching: AtomicBool::new(false),
        }
    }

    /// Load the registry from `store` and wire a loader on the same store.
    pub async fn connect(
        store: Arc<dyn RemoteStore>,
        preferences: Arc<dyn PreferenceStore>,
        session_ttl: chrono::Duration,
    ) -> Self {
        let registry = LanguageRegistry::load(store.as_ref(), &RetryConfig::registry_load()).await;
        let loader = NamespaceLoader::new(RemoteTranslations::new(store))
            .with_session_cache(Arc::new(SessionCache::new(session_ttl)));

        Self::new(registry, preferences, Arc::new(loader))
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Languages for the picker, in registry order
    pub fn languages(&self) -> &[Language] {
        self.registry.list_all()
    }

    pub fn loader(&self) -> &Arc<NamespaceLoader> {
        &self.loader
    }

    pub fn active_language(&self) -> String {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_switching(&self) -> bool {
        self.switching.load(Ordering::SeqCst)
    }

    /// Request namespaces for the active language; they stay mounted and
    /// are re-resolved on every later language change.
    pub async fn use_namespaces<S: AsRef<str>>(&self, namespaces: &[S]) -> NamespaceStatus {
        let language = self.active_language();
        self.loader.load(&language, namespaces).await
    }

    /// Translator for `namespace` in the current active language
    pub fn translator(&self, namespace: &str) -> Translator<'_> {
        Translator::new(&self.loader, &self.active_language(), namespace)
    }

    /// Switch the active language.
    ///
    /// At most one switch runs at a time; overlapping requests are ignored
    /// rather than queued. The switch waits one scheduler tick, persists the
    /// choice, then re-resolves every mounted namespace in a single pass.
    pub async fn set_active_language(&self, code: &str) -> LanguageChange {
        if !self.registry.contains(code) {
            debug!("Ignoring switch to unknown language '{}'", code);
            return LanguageChange::Ignored(IgnoreReason::UnknownLanguage);
        }
        if self.active_language() == code {
            return LanguageChange::Ignored(IgnoreReason::AlreadyActive);
        }
        if self
            .switching
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Language switch in progress; ignoring '{}'", code);
            return LanguageChange::Ignored(IgnoreReason::SwitchInProgress);
        }
        let _guard = SwitchGuard(&self.switching);

        tokio::task::yield_now().await;

        if let Err(e) =
            self.preferences
                .set(LANGUAGE_PREFERENCE_KEY, code, language_preference_max_age())
        {
            warn!("Failed to persist language preference: {}", e);
        }

        let previous = std::mem::replace(
            &mut *self.active.write().unwrap_or_else(PoisonError::into_inner),
            code.to_string(),
        );
        info!("Switched language from '{}' to '{}'", previous, code);

        let status = self.loader.reload_mounted(code).await;
        LanguageChange::Applied { status }
    }

    /// Drop cached translations; see [`NamespaceLoader::invalidate`]
    pub fn invalidate(&self, namespace: Option<&str>) -> usize {
        self.loader.invalidate(namespace)
    }
}
