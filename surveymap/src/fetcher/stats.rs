//! Per-job network statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe counters for the tile fetches of one export.
///
/// Updated concurrently by fetch tasks and read once the job settles.
///
/// # Example
///
/// ```
/// use surveymap::fetcher::NetworkStats;
///
/// let stats = NetworkStats::new();
/// stats.record_tile_success(1024);
/// stats.record_tile_failure();
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.tiles_fetched, 1);
/// assert_eq!(snapshot.tiles_failed, 1);
/// ```
pub struct NetworkStats {
    bytes_fetched: AtomicU64,
    tiles_fetched: AtomicU64,
    tiles_failed: AtomicU64,
    retries: AtomicU64,
    started: Instant,
}

/// Point-in-time copy of [`NetworkStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStatsSnapshot {
    pub bytes_fetched: u64,
    pub tiles_fetched: u64,
    pub tiles_failed: u64,
    pub retries: u64,
    pub elapsed: Duration,
}

impl NetworkStatsSnapshot {
    /// Mean throughput over the job's wall-clock time.
    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_fetched as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for NetworkStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tiles ok, {} failed, {} retries, {:.1} KB in {:.2}s",
            self.tiles_fetched,
            self.tiles_failed,
            self.retries,
            self.bytes_fetched as f64 / 1024.0,
            self.elapsed.as_secs_f64()
        )
    }
}

impl NetworkStats {
    pub fn new() -> Self {
        Self {
            bytes_fetched: AtomicU64::new(0),
            tiles_fetched: AtomicU64::new(0),
            tiles_failed: AtomicU64::new(0),
            retries: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Record a tile fetched and decoded.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Encoded size of the tile body
    pub fn record_tile_success(&self, bytes: usize) {
        self.bytes_fetched.fetch_add(bytes as u64, Ordering::Relaxed);
        self.tiles_fetched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a tile that exhausted its attempts.
    pub fn record_tile_failure(&self) {
        self.tiles_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a retry attempt.
    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> NetworkStatsSnapshot {
        NetworkStatsSnapshot {
            bytes_fetched: self.bytes_fetched.load(Ordering::Relaxed),
            tiles_fetched: self.tiles_fetched.load(Ordering::Relaxed),
            tiles_failed: self.tiles_failed.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for NetworkStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_stats_are_zero() {
        let snapshot = NetworkStats::new().snapshot();
        assert_eq!(snapshot.bytes_fetched, 0);
        assert_eq!(snapshot.tiles_fetched, 0);
        assert_eq!(snapshot.tiles_failed, 0);
        assert_eq!(snapshot.retries, 0);
    }

    #[test]
    fn test_counters() {
        let stats = NetworkStats::new();
        stats.record_tile_success(1024);
        stats.record_tile_success(2048);
        stats.record_tile_failure();
        stats.record_retry();
        stats.record_retry();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.bytes_fetched, 3072);
        assert_eq!(snapshot.tiles_fetched, 2);
        assert_eq!(snapshot.tiles_failed, 1);
        assert_eq!(snapshot.retries, 2);
    }

    #[test]
    fn test_display_summary() {
        let stats = NetworkStats::new();
        stats.record_tile_success(2048);
        let text = stats.snapshot().to_string();
        assert!(text.starts_with("1 tiles ok, 0 failed, 0 retries, 2.0 KB"));
    }

    #[test]
    fn test_thread_safety() {
        let stats = Arc::new(NetworkStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..50 {
                        stats.record_tile_success(10);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.tiles_fetched, 400);
        assert_eq!(snapshot.bytes_fetched, 4000);
    }
}
