//! Observer hook for errors the cache swallows.
//!
//! The cache never surfaces failures to its callers. Instead each caught error
//! is handed to a `CacheObserver`, so an embedding application can log or
//! count them however it likes.

use std::fmt;

use tracing::{debug, warn};

use crate::error::CacheError;

// == Cache Op ==
/// The public cache method in which an error was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOp {
    Set,
    Get,
    Delete,
    ClearExpired,
    Clear,
    GetSize,
    IsAvailable,
    Keys,
}

impl fmt::Display for CacheOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheOp::Set => "set",
            CacheOp::Get => "get",
            CacheOp::Delete => "delete",
            CacheOp::ClearExpired => "clear_expired",
            CacheOp::Clear => "clear",
            CacheOp::GetSize => "get_size",
            CacheOp::IsAvailable => "is_available",
            CacheOp::Keys => "keys",
        };
        f.write_str(name)
    }
}

// == Eviction Reason ==
/// Why a read or sweep removed an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    Expired,
    VersionMismatch,
    Corrupt,
}

// == Cache Observer ==
/// Receives errors and evictions from an `ExpiringCache`.
pub trait CacheObserver: Send + Sync {
    /// Called for every error caught inside a cache method.
    fn on_error(&self, op: CacheOp, error: &CacheError);

    /// Called when an entry is removed lazily or by a sweep.
    fn on_evict(&self, _key: &str, _reason: EvictionReason) {}
}

// == Tracing Observer ==
/// Default observer, logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn on_error(&self, op: CacheOp, error: &CacheError) {
        warn!(op = %op, "Cache error: {}", error);
    }

    fn on_evict(&self, key: &str, reason: EvictionReason) {
        debug!(key, ?reason, "Cache entry evicted");
    }
}
