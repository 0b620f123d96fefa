//! Translation metrics and observability module.
//!
//! Counts where namespace loads were satisfied: the resource table, the
//! static bundle, the session cache, or the remote store.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Namespaces already present in the resource table
    cache_hits: AtomicUsize,

    /// Namespaces served from the static bundle
    static_hits: AtomicUsize,

    /// Namespaces restored from the session cache
    session_hits: AtomicUsize,

    /// Calls made to the remote store (one per batch, not per attempt)
    remote_fetches: AtomicUsize,

    /// Remote calls that failed after all retries
    remote_failures: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_static_hit(&self) {
        self.static_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_hit(&self) {
        self.session_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_fetch(&self) {
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_failure(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn static_hits(&self) -> usize {
        self.static_hits.load(Ordering::Relaxed)
    }

    pub fn session_hits(&self) -> usize {
        self.session_hits.load(Ordering::Relaxed)
    }

    pub fn remote_fetches(&self) -> usize {
        self.remote_fetches.load(Ordering::Relaxed)
    }

    pub fn remote_failures(&self) -> usize {
        self.remote_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let cache_hits = self.cache_hits();
        let static_hits = self.static_hits();
        let session_hits = self.session_hits();
        let remote_fetches = self.remote_fetches();
        let remote_failures = self.remote_failures();

        let local = cache_hits + static_hits + session_hits;
        let total = local + remote_fetches;
        let local_hit_rate = if total > 0 {
            (local as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        let remote_success_rate = if remote_fetches > 0 {
            ((remote_fetches - remote_failures) as f64 / remote_fetches as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits,
            static_hits,
            session_hits,
            remote_fetches,
            remote_failures,
            local_hit_rate,
            remote_success_rate,
        }
    }
}

/// Metrics report containing current translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub static_hits: usize,
    pub session_hits: usize,
    pub remote_fetches: usize,
    pub remote_failures: usize,

    /// Share of lookups answered without the network, as a percentage (0-100)
    pub local_hit_rate: f64,

    /// Remote success rate as a percentage (0-100)
    pub remote_success_rate: f64,
}
