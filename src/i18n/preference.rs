//! Durable visitor preferences (the language cookie).
//!
//! Values carry an absolute expiry; an expired value reads as absent.
//! The file-backed store keeps every preference in one JSON document.

use crate::error::{I18nError, I18nResult};
use crate::i18n::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Name under which the active language code is persisted
pub const LANGUAGE_PREFERENCE_KEY: &str = "kudosim_language";

/// Lifetime of the language preference
pub fn language_preference_max_age() -> Duration {
    Duration::days(365)
}

/// Storage for small named values that outlive the session.
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `None` if missing or expired
    fn get(&self, name: &str) -> Option<String>;

    /// Write a value that expires after `max_age`
    fn set(&self, name: &str, value: &str, max_age: Duration) -> I18nResult<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct StoredPreference {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Preferences kept in a JSON file on disk.
pub struct FilePreferenceStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document; a missing or corrupt file reads as empty
    fn read_all(&self) -> HashMap<String, StoredPreference> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read preferences at {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(
                "Ignoring corrupt preferences file {}: {}",
                self.path.display(),
                e
            );
            HashMap::new()
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, name: &str) -> Option<String> {
        let now = self.clock.now();
        self.read_all()
            .remove(name)
            .filter(|p| p.expires_at > now)
            .map(|p| p.value)
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) -> I18nResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        let mut all = self.read_all();
        all.retain(|_, p| p.expires_at > now);
        all.insert(
            name.to_string(),
            StoredPreference {
                value: value.to_string(),
                expires_at: now + max_age,
            },
        );

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                I18nError::Preference(format!("create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&all)
            .map_err(|e| I18nError::Preference(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| I18nError::Preference(format!("write {}: {}", self.path.display(), e)))
    }
}

/// Preferences held in memory (tests, embedded use).
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, StoredPreference>>,
    clock: Arc<dyn Clock>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, name: &str) -> Option<String> {
        let now = self.clock.now();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .filter(|p| p.expires_at > now)
            .map(|p| p.value.clone())
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) -> I18nResult<()> {
        let expires_at = self.clock.now() + max_age;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                name.to_string(),
                StoredPreference {
                    value: value.to_string(),
                    expires_at,
                },
            );
        Ok(())
    }
}
