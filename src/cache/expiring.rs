//! Expiring Cache Module
//!
//! The cache engine. Wraps a shared `KeyValueStore`, scopes every key under a
//! prefix, and stamps entries with a version and TTL that are checked on read.
//!
//! No method here returns an error or panics. Store failures are reported to
//! the observer and turned into a safe default.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{
    current_timestamp_ms, CacheEntry, CacheStats, EntryHeader, SetOptions, DEFAULT_PREFIX,
    DEFAULT_TTL_MS, DEFAULT_VERSION, PROBE_KEY,
};
use crate::error::CacheError;
use crate::observer::{CacheObserver, CacheOp, EvictionReason, TracingObserver};
use crate::store::KeyValueStore;

// == Expiring Cache ==
/// TTL cache over a shared key-value store.
pub struct ExpiringCache {
    /// Underlying store, possibly shared with other caches
    store: Arc<dyn KeyValueStore>,
    /// Namespace prepended to every logical key
    prefix: String,
    /// Version stamped on writes and required on reads
    version: String,
    /// Lifetime applied when a write gives none
    default_ttl: u64,
    /// Receives every error caught at the method boundary
    observer: Arc<dyn CacheObserver>,
    stats: Mutex<CacheStats>,
}

impl ExpiringCache {
    // == Constructors ==
    /// Creates a cache with the default prefix and version.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_namespace(store, DEFAULT_PREFIX, DEFAULT_VERSION)
    }

    /// Creates a cache scoped to `prefix` that reads and writes `version`.
    ///
    /// # Arguments
    /// * `store` - Shared underlying store
    /// * `prefix` - Namespace for physical keys
    /// * `version` - Version tag for entries
    pub fn with_namespace(
        store: Arc<dyn KeyValueStore>,
        prefix: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            version: version.into(),
            default_ttl: DEFAULT_TTL_MS,
            observer: Arc::new(TracingObserver),
            stats: Mutex::new(CacheStats::new()),
        }
    }

    /// Replaces the error hook.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CacheObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the lifetime used by writes without an explicit TTL.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl_ms: u64) -> Self {
        self.default_ttl = ttl_ms;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Set ==
    /// Stores `data` under `key`, overwriting any previous entry.
    ///
    /// When the store rejects the write, expired entries are swept once to
    /// reclaim space. The write itself is not retried.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T, options: SetOptions) {
        let Some(full_key) = self.full_key(CacheOp::Set, key) else {
            return;
        };

        let entry = CacheEntry::new(
            data,
            options.ttl.unwrap_or(self.default_ttl),
            options.version.unwrap_or_else(|| self.version.clone()),
        );

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                self.report(CacheOp::Set, &CacheError::from(e));
                return;
            }
        };

        if let Err(e) = self.store.set_item(&full_key, &raw) {
            self.stats.lock().record_write_failure();
            self.observer.on_error(CacheOp::Set, &e);
            self.clear_expired();
        }
    }

    // == Get ==
    /// Returns the value under `key` if present, fresh and of this version.
    ///
    /// Expired or version-mismatched entries are removed as a side effect,
    /// even when their payload would not decode into `T`. Unparseable entries
    /// and payloads of the wrong shape read as a miss and are left in place.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full_key = self.full_key(CacheOp::Get, key)?;

        let raw = match self.store.get_item(&full_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.miss(),
            Err(e) => {
                self.report(CacheOp::Get, &e);
                return self.miss();
            }
        };

        // Bookkeeping is checked before the payload is decoded, so entries
        // whose data no longer fits `T` still get evicted when stale.
        let entry: CacheEntry<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => return self.corrupt_miss(full_key, e),
        };

        if entry.is_expired_at(current_timestamp_ms()) {
            self.stats.lock().record_expired();
            self.evict(CacheOp::Get, &full_key, EvictionReason::Expired);
            return self.miss();
        }

        if entry.version != self.version {
            self.stats.lock().record_version_mismatch();
            self.observer.on_error(
                CacheOp::Get,
                &CacheError::VersionMismatch {
                    key: full_key.clone(),
                    found: entry.version,
                    expected: self.version.clone(),
                },
            );
            self.evict(CacheOp::Get, &full_key, EvictionReason::VersionMismatch);
            return self.miss();
        }

        let data: T = match serde_json::from_value(entry.data) {
            Ok(data) => data,
            Err(e) => return self.corrupt_miss(full_key, e),
        };

        self.stats.lock().record_hit();
        Some(data)
    }

    // == Delete ==
    /// Removes the entry under `key`. Missing keys are a no-op.
    pub fn delete(&self, key: &str) {
        let Some(full_key) = self.full_key(CacheOp::Delete, key) else {
            return;
        };

        if let Err(e) = self.store.remove_item(&full_key) {
            self.report(CacheOp::Delete, &e);
        }
    }

    // == Clear Expired ==
    /// Sweeps the namespace, removing expired and unparseable entries.
    ///
    /// Each key is handled on its own so a failure on one does not stop the
    /// sweep. Returns the number of entries removed.
    pub fn clear_expired(&self) -> usize {
        let Some(keys) = self.scoped_keys(CacheOp::ClearExpired) else {
            return 0;
        };

        let now = current_timestamp_ms();
        let mut removed = 0;

        for full_key in keys {
            let raw = match self.store.get_item(&full_key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    self.report(CacheOp::ClearExpired, &e);
                    continue;
                }
            };

            let reason = match serde_json::from_str::<EntryHeader>(&raw) {
                Ok(header) if header.is_expired_at(now) => EvictionReason::Expired,
                Ok(_) => continue,
                Err(_) => EvictionReason::Corrupt,
            };

            if self.evict(CacheOp::ClearExpired, &full_key, reason) {
                let mut stats = self.stats.lock();
                match reason {
                    EvictionReason::Corrupt => stats.record_corrupt(),
                    _ => stats.record_expired(),
                }
                removed += 1;
            }
        }

        self.stats.lock().record_sweep();
        removed
    }

    // == Clear ==
    /// Removes every entry in the namespace regardless of TTL or version.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&self) -> usize {
        let Some(keys) = self.scoped_keys(CacheOp::Clear) else {
            return 0;
        };

        keys.iter()
            .filter(|full_key| match self.store.remove_item(full_key) {
                Ok(()) => true,
                Err(e) => {
                    self.report(CacheOp::Clear, &e);
                    false
                }
            })
            .count()
    }

    // == Get Size ==
    /// Total UTF-8 bytes of the serialized entries in the namespace.
    ///
    /// Any store error during the scan yields zero.
    pub fn get_size(&self) -> u64 {
        let Some(keys) = self.scoped_keys(CacheOp::GetSize) else {
            return 0;
        };

        let mut total = 0u64;
        for full_key in keys {
            match self.store.get_item(&full_key) {
                Ok(Some(raw)) => total += raw.len() as u64,
                Ok(None) => {}
                Err(e) => {
                    self.report(CacheOp::GetSize, &e);
                    return 0;
                }
            }
        }
        total
    }

    // == Is Available ==
    /// Probes the store by writing then removing a throwaway key.
    pub fn is_available(&self) -> bool {
        let probe = self
            .store
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|()| self.store.remove_item(PROBE_KEY));

        match probe {
            Ok(()) => true,
            Err(e) => {
                self.report(CacheOp::IsAvailable, &e);
                false
            }
        }
    }

    // == Keys ==
    /// Logical keys currently stored in the namespace, prefix stripped.
    ///
    /// Includes entries that are expired but not yet swept.
    pub fn keys(&self) -> Vec<String> {
        self.scoped_keys(CacheOp::Keys)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|full_key| full_key.strip_prefix(&self.prefix).map(str::to_string))
            .collect()
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    // == Helpers ==
    fn full_key(&self, op: CacheOp, key: &str) -> Option<String> {
        if key.is_empty() {
            self.observer.on_error(
                op,
                &CacheError::InvalidRequest("Key cannot be empty".to_string()),
            );
            return None;
        }
        Some(format!("{}{}", self.prefix, key))
    }

    fn scoped_keys(&self, op: CacheOp) -> Option<Vec<String>> {
        match self.store.keys() {
            Ok(keys) => Some(
                keys.into_iter()
                    .filter(|k| k.starts_with(&self.prefix))
                    .collect(),
            ),
            Err(e) => {
                self.report(op, &e);
                None
            }
        }
    }

    /// Removes a stale entry, returning whether the store accepted the removal.
    fn evict(&self, op: CacheOp, full_key: &str, reason: EvictionReason) -> bool {
        match self.store.remove_item(full_key) {
            Ok(()) => {
                self.observer.on_evict(full_key, reason);
                true
            }
            Err(e) => {
                self.report(op, &e);
                false
            }
        }
    }

    fn corrupt_miss<T>(&self, full_key: String, error: serde_json::Error) -> Option<T> {
        self.stats.lock().record_corrupt();
        self.observer.on_error(
            CacheOp::Get,
            &CacheError::CorruptEntry {
                key: full_key,
                reason: error.to_string(),
            },
        );
        self.miss()
    }

    fn miss<T>(&self) -> Option<T> {
        self.stats.lock().record_miss();
        None
    }

    fn report(&self, op: CacheOp, error: &CacheError) {
        self.stats.lock().record_store_error();
        self.observer.on_error(op, error);
    }
}

impl fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("prefix", &self.prefix)
            .field("version", &self.version)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
