//! Expiring KV - namespaced TTL caching over a key-value store
//!
//! Wraps a localStorage-shaped store with prefixed keys, version stamps and
//! lazy expiry, and serves one cache over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod observer;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStats, ExpiringCache, SetOptions};
pub use config::Config;
pub use error::CacheError;
pub use observer::{CacheObserver, CacheOp, EvictionReason, TracingObserver};
pub use store::{DisabledStore, FileStore, KeyValueStore, MemoryStore};
pub use tasks::spawn_sweep_task;
