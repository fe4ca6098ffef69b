//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, swept expirations, and inserts
//! rejected by the capacity bound.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Activity counters for a cache store.
///
/// Counters are atomic so the read path (`get`) can record hits and misses
/// through a shared reference.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    expired_removed: AtomicU64,
    rejected_inserts: AtomicU64,
}

// == Stats View ==
/// A plain copy of the counters at one point in time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsView {
    /// Successful retrievals
    pub hits: u64,
    /// Failed retrievals (key absent or lazily expired)
    pub misses: u64,
    /// Entries removed by expiry sweeps
    pub expired_removed: u64,
    /// New-key inserts refused by the capacity bound
    pub rejected_inserts: u64,
}

impl StatsView {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds to the swept-expiration counter.
    pub fn record_expired(&self, count: u64) {
        self.expired_removed.fetch_add(count, Ordering::Relaxed);
    }

    /// Increments the rejected-insert counter.
    pub fn record_rejected_insert(&self) {
        self.rejected_inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values out.
    pub fn view(&self) -> StatsView {
        StatsView {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired_removed: self.expired_removed.load(Ordering::Relaxed),
            rejected_inserts: self.rejected_inserts.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        let view = stats.view();
        assert_eq!(view.hits, 0);
        assert_eq!(view.misses, 0);
        assert_eq!(view.expired_removed, 0);
        assert_eq!(view.rejected_inserts, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.view().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.view().hit_rate(), 0.5);
    }

    #[test]
    fn test_record_expired_batch() {
        let stats = CacheStats::new();
        stats.record_expired(3);
        stats.record_expired(2);
        assert_eq!(stats.view().expired_removed, 5);
    }

    #[test]
    fn test_record_rejected_insert() {
        let stats = CacheStats::new();
        stats.record_rejected_insert();
        assert_eq!(stats.view().rejected_inserts, 1);
    }
}
