//! In-memory store with optional byte quota.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Stored Items ==
/// Key/value map with running byte accounting.
///
/// Usage counts the UTF-8 length of every key plus its value, which is how
/// browser stores charge against their quota.
#[derive(Debug, Clone, Default)]
pub struct StoredItems {
    items: BTreeMap<String, String>,
    used_bytes: u64,
}

impl StoredItems {
    /// Builds accounting over an already loaded map.
    pub fn from_map(items: BTreeMap<String, String>) -> Self {
        let used_bytes = items.iter().map(|(k, v)| item_size(k, v)).sum();
        Self { items, used_bytes }
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.items.get(key)
    }

    /// Inserts `value`, refusing when the result would exceed `quota` bytes.
    ///
    /// Returns the value that was replaced, if any.
    pub fn insert(&mut self, key: &str, value: &str, quota: Option<u64>) -> Result<Option<String>> {
        let released = self.items.get(key).map(|old| item_size(key, old)).unwrap_or(0);
        let projected = self.used_bytes - released + item_size(key, value);

        if let Some(limit) = quota {
            if projected > limit {
                return Err(CacheError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.used_bytes = projected;
        Ok(self.items.insert(key.to_string(), value.to_string()))
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.items.remove(key);
        if let Some(old) = &removed {
            self.used_bytes -= item_size(key, old);
        }
        removed
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.items
    }
}

fn item_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

// == Memory Store ==
/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<StoredItems>,
    /// Maximum bytes (keys plus values), None = unbounded
    quota: Option<u64>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes past `quota_bytes`.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            items: RwLock::new(StoredItems::default()),
            quota: Some(quota_bytes),
        }
    }

    /// Bytes currently charged against the quota.
    pub fn used_bytes(&self) -> u64 {
        self.items.read().used_bytes()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key, value, self.quota)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.read().keys())
    }
}
