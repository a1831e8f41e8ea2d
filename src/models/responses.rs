//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for GET /entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The cached value
    pub data: serde_json::Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}

/// Response body for PUT /entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /entries and POST /sweep
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for GET /size
#[derive(Debug, Clone, Serialize)]
pub struct SizeResponse {
    /// Serialized bytes held under the cache prefix
    pub bytes: u64,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the store accepts writes, "degraded" otherwise
    pub status: String,
    /// Result of the store probe
    pub store_available: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn from_probe(store_available: bool) -> Self {
        let status = if store_available { "healthy" } else { "degraded" };
        Self {
            status: status.to_string(),
            store_available,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("user", json!({"id": 1}));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({"key": "user", "data": {"id": 1}}));
    }

    #[test]
    fn test_set_response_serialize() {
        let json = serde_json::to_string(&SetResponse::new("my_key")).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_expired();

        let value = serde_json::to_value(StatsResponse::from(stats)).unwrap();
        assert_eq!(value["hits"], 1);
        assert_eq!(value["misses"], 1);
        assert_eq!(value["expired"], 1);
        assert_eq!(value["hit_rate"], 0.5);
    }

    #[test]
    fn test_health_response_status() {
        assert_eq!(HealthResponse::from_probe(true).status, "healthy");

        let degraded = HealthResponse::from_probe(false);
        assert_eq!(degraded.status, "degraded");
        assert!(!degraded.store_available);
        assert!(!degraded.timestamp.is_empty());
    }
}
