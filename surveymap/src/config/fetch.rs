//! Tile fetch configuration.

use std::time::Duration;

use super::defaults::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_RETRIES, DEFAULT_PARALLEL_FETCHES,
    DEFAULT_RETRY_BACKOFF_MS,
};

/// Settings for fetching the tiles of one export.
///
/// # Example
///
/// ```
/// use surveymap::config::FetchConfig;
///
/// let config = FetchConfig::default();
/// assert_eq!(config.timeout_secs(), 10);
/// assert_eq!(config.max_retries(), 0);
/// assert_eq!(config.parallel_fetches(), 8);
///
/// let config = FetchConfig::new()
///     .with_timeout_secs(5)
///     .with_max_retries(2)
///     .with_parallel_fetches(4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Deadline for a single tile attempt (in seconds)
    timeout_secs: u64,
    /// Attempts after the first one
    max_retries: u32,
    /// Concurrent tile fetches
    parallel_fetches: usize,
    /// Fixed pause between attempts (in milliseconds)
    retry_backoff_ms: u64,
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-attempt deadline. Default: 10 seconds.
    pub fn with_timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = timeout;
        self
    }

    /// Sets how many times a failed tile is retried. Default: 0.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the number of concurrent fetches. Values below 1 are raised to 1.
    pub fn with_parallel_fetches(mut self, parallel: usize) -> Self {
        self.parallel_fetches = parallel.max(1);
        self
    }

    pub fn with_retry_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.retry_backoff_ms = backoff_ms;
        self
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn parallel_fetches(&self) -> usize {
        self.parallel_fetches
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            parallel_fetches: DEFAULT_PARALLEL_FETCHES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}
