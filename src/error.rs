//! Error types shared by the store, loader and editor layers.

use thiserror::Error;

/// Failure talking to the remote tabular store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport failure (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Store answered with a non-success status
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded into the expected rows
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Rate limiting (429) and server errors (5xx) are transient, as are
    /// transport failures. Other 4xx responses are the caller's fault and
    /// repeating the request will not change the answer.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Network(_) => true,
            StoreError::Status { status, .. } => *status == 429 || *status >= 500,
            StoreError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Errors surfaced by the translation pipeline.
///
/// None of these are fatal to rendering: callers receive them as a value
/// next to whatever was resolved, never as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Languages table could not be read; the built-in list is used instead
    #[error("Failed to load languages: {0}")]
    RegistryLoad(StoreError),

    /// Translations could not be fetched after all retries
    #[error("Failed to fetch translations for [{}]: {source}", namespaces.join(", "))]
    RemoteFetch {
        namespaces: Vec<String>,
        source: StoreError,
    },

    /// An admin write to the translations table was rejected
    #[error("Failed to write translations: {0}")]
    StoreWrite(StoreError),

    /// Durable preference storage could not be read or written
    #[error("Preference storage error: {0}")]
    Preference(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type I18nResult<T> = std::result::Result<T, I18nError>;
