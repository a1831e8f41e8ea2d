//! Cache Entry Module
//!
//! Defines the record written to the store for each cached value.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// Stored wrapper around a cached value.
///
/// Serializes to `{"data":..,"timestamp":..,"version":..,"ttl":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub data: T,
    /// Write time (Unix milliseconds)
    pub timestamp: u64,
    /// Version tag the entry was written under
    pub version: String,
    /// Lifetime in milliseconds after `timestamp`
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    ///
    /// # Arguments
    /// * `data` - The value to wrap
    /// * `ttl` - Lifetime in milliseconds
    /// * `version` - Version tag
    pub fn new(data: T, ttl: u64, version: impl Into<String>) -> Self {
        Self {
            data,
            timestamp: current_timestamp_ms(),
            version: version.into(),
            ttl,
        }
    }

    // == Age ==
    /// Milliseconds elapsed between the write and `now`.
    ///
    /// A timestamp in the future (clock moved backwards) counts as age zero.
    pub fn age_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    // == Is Expired ==
    /// Checks expiry against an explicit clock reading.
    ///
    /// Boundary condition: the entry is still valid when exactly `ttl`
    /// milliseconds have passed, and expired only once the age exceeds it.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.age_at(now) > self.ttl
    }

    /// Checks expiry against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.ttl.saturating_sub(self.age_at(current_timestamp_ms()))
    }
}

// == Entry Header ==
/// The bookkeeping fields of an entry, read without decoding `data`.
///
/// Sweeps only need the timestamp and ttl, so the payload is skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryHeader {
    #[allow(dead_code)]
    data: serde::de::IgnoredAny,
    pub timestamp: u64,
    pub version: String,
    pub ttl: u64,
}

impl EntryHeader {
    pub fn is_expired_at(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) > self.ttl
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A system clock set before the epoch reads as zero.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
