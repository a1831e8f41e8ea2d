//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::SetOptions;

/// Longest key the API accepts, in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for PUT /entries/:key
///
/// # Fields
/// - `data`: Any JSON value to cache
/// - `ttl`: Optional lifetime in milliseconds (cache default if omitted)
/// - `version`: Optional version tag (cache version if omitted)
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    /// The value to store
    pub data: serde_json::Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional version override
    #[serde(default)]
    pub version: Option<String>,
}

impl SetEntryRequest {
    /// Splits the request into payload and write options.
    pub fn into_parts(self) -> (serde_json::Value, SetOptions) {
        let options = SetOptions {
            ttl: self.ttl,
            version: self.version,
        };
        (self.data, options)
    }
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
