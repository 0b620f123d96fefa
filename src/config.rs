use crate::store::{MemoryStore, RemoteStore, RestStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    // Remote store (unset URL = offline, in-memory)
    pub store_url: Option<String>,
    pub store_api_key: String,

    // Durable preferences
    pub preference_path: PathBuf,

    // Caching / network
    pub session_cache_ttl_secs: i64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store_url = std::env::var("STORE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        // The key is only mandatory when there is a store to talk to
        let store_api_key = match store_url {
            Some(_) => std::env::var("STORE_API_KEY").context("STORE_API_KEY not set")?,
            None => std::env::var("STORE_API_KEY").unwrap_or_default(),
        };

        Ok(Self {
            store_url,
            store_api_key,

            preference_path: std::env::var("PREFERENCE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".kudosim/preferences.json")),

            session_cache_ttl_secs: std::env::var("SESSION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &i64| *secs > 0)
                .unwrap_or(300),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(10),
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Store client for the configured URL, or an empty in-memory store
    pub fn build_store(&self) -> Result<Arc<dyn RemoteStore>> {
        match &self.store_url {
            Some(url) => {
                info!("Using remote store at {}", url);
                let store = RestStore::new(url, &self.store_api_key, self.request_timeout())
                    .context("Failed to build store client")?;
                Ok(Arc::new(store))
            }
            None => {
                info!("STORE_URL not set; running offline with static translations only");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
