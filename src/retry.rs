//! Exponential backoff for calls to the remote store.
//!
//! The delay before retry `n` (0-based) is
//! `min(initial_delay * backoff_multiplier^n, max_delay)`.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, first call included; 0 behaves like 1
    pub max_attempts: u32,
    pub initial_delay: Duration,
    /// Cap applied to every individual wait
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Doubling backoff with a 30s cap
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Translation fetches: 4 attempts, waits of 1s, 2s, 4s (5s cap)
    pub fn remote_fetch() -> Self {
        Self::new(4, Duration::from_secs(1)).with_max_delay(Duration::from_secs(5))
    }

    /// Language registry: 2 attempts, one 500ms wait. The registry has a
    /// built-in fallback so it gives up early.
    pub fn registry_load() -> Self {
        Self::new(2, Duration::from_millis(500)).with_max_delay(Duration::from_secs(1))
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait before retry `retry` (0 = the wait after the first failure)
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry.min(i32::MAX as u32) as i32);
        let millis = self.initial_delay.as_millis() as f64 * factor;
        if !millis.is_finite() || millis >= self.max_delay.as_millis() as f64 {
            return self.max_delay;
        }
        Duration::from_millis(millis as u64)
    }

    /// Total time spent waiting when every attempt fails
    pub fn worst_case_wait(&self) -> Duration {
        (0..self.attempts() - 1)
            .map(|retry| self.delay_before_retry(retry))
            .sum()
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::remote_fetch()
    }
}

/// Run `operation` until it succeeds or the attempts run out.
///
/// Returns the last error once every attempt has failed.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry_if(config, operation_name, operation, |_| true).await
}

/// Like [`with_retry`], but an error for which `should_retry` is false is
/// returned at once.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = config.attempts();
    let mut retry = 0;

    loop {
        let attempt = retry + 1;
        match operation().await {
            Ok(value) => {
                if retry > 0 {
                    debug!("{}: succeeded on attempt {}/{}", operation_name, attempt, attempts);
                }
                return Ok(value);
            }
            Err(e) if !should_retry(&e) => {
                debug!("{}: not retrying: {}", operation_name, e);
                return Err(e);
            }
            Err(e) if attempt >= attempts => {
                warn!(
                    "{}: giving up after {} attempts ({:?} of backoff): {}",
                    operation_name,
                    attempts,
                    config.worst_case_wait(),
                    e
                );
                return Err(e);
            }
            Err(e) => {
                let delay = config.delay_before_retry(retry);
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {:?}",
                    operation_name, attempt, attempts, e, delay
                );
                sleep(delay).await;
                retry += 1;
            }
        }
    }
}
