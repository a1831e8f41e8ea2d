//! Configuration Module
//!
//! Loads cache and server settings from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_PREFIX, DEFAULT_TTL_MS, DEFAULT_VERSION};

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace for cache keys
    pub prefix: String,
    /// Version stamped on and required of entries
    pub version: String,
    /// Default TTL in milliseconds for writes without one
    pub default_ttl_ms: u64,
    /// File backing the store, None = in-memory store
    pub store_path: Option<PathBuf>,
    /// Store quota in bytes, 0 = unlimited
    pub quota_bytes: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expiry sweep interval in seconds, 0 = no sweep task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` - Key namespace (default: app_cache_)
    /// - `CACHE_VERSION` - Entry version (default: 1.0.0)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 3600000)
    /// - `STORE_PATH` - JSON file for a durable store (default: unset)
    /// - `STORE_QUOTA_BYTES` - Store quota (default: 5242880)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.prefix),
            version: env::var("CACHE_VERSION").unwrap_or(defaults.version),
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            store_path: env::var("STORE_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            quota_bytes: parse_var("STORE_QUOTA_BYTES").unwrap_or(defaults.quota_bytes),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }

    /// Quota as the stores take it.
    pub fn quota(&self) -> Option<u64> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            version: DEFAULT_VERSION.to_string(),
            default_ttl_ms: DEFAULT_TTL_MS,
            store_path: None,
            quota_bytes: 5 * 1024 * 1024,
            server_port: 3000,
            sweep_interval: 60,
        }
    }
}
