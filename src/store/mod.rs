//! Store Module
//!
//! The synchronous string-to-string store the cache sits on. Shaped like a
//! browser's localStorage: get, set, remove and key enumeration, where a set
//! may fail once the store is full.

mod disabled;
mod file;
mod memory;

pub use disabled::DisabledStore;
pub use file::FileStore;
pub use memory::{MemoryStore, StoredItems};

use crate::error::Result;

// == Key Value Store ==
/// Underlying persistent store shared by one or more caches.
///
/// Implementations lock internally, so every method takes `&self` and a
/// single store can sit behind an `Arc` used by caches with different
/// prefixes.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Lists every key currently in the store.
    fn keys(&self) -> Result<Vec<String>>;
}
