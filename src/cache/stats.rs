//! Cache Statistics Module
//!
//! Tracks hits, misses and the reasons entries were dropped.

use serde::Serialize;

// == Cache Stats ==
/// Counters for one cache instance.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that returned nothing, for any reason
    pub misses: u64,
    /// Entries evicted because their TTL elapsed
    pub expired: u64,
    /// Entries evicted because they carried another version
    pub version_mismatches: u64,
    /// Entries that could not be parsed
    pub corrupt: u64,
    /// Writes the store rejected
    pub write_failures: u64,
    /// Other store errors caught at the method boundary
    pub store_errors: u64,
    /// Completed expiry sweeps
    pub sweeps: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn record_version_mismatch(&mut self) {
        self.version_mismatches += 1;
    }

    pub fn record_corrupt(&mut self) {
        self.corrupt += 1;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    pub fn record_store_error(&mut self) {
        self.store_errors += 1;
    }

    pub fn record_sweep(&mut self) {
        self.sweeps += 1;
    }
}
