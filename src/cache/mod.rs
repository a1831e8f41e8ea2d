//! Cache Module
//!
//! Namespaced, versioned TTL caching of serializable values on top of a
//! `KeyValueStore`.

mod entry;
mod expiring;
mod options;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, EntryHeader};
pub use expiring::ExpiringCache;
pub use options::SetOptions;
pub use stats::CacheStats;

// == Public Constants ==
/// Namespace used when none is given
pub const DEFAULT_PREFIX: &str = "app_cache_";

/// Version stamped on entries when none is given
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Entry lifetime when `SetOptions::ttl` is unset (1 hour)
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;

/// Throwaway key written by `ExpiringCache::is_available`
pub const PROBE_KEY: &str = "__storage_test__";
