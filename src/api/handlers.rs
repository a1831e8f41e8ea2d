//! API Handlers
//!
//! HTTP request handlers for each endpoint. The cache is synchronous and
//! takes `&self`, so no lock is needed, but its store may do blocking file
//! I/O. Every call that touches the store runs on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, KeysResponse, RemovedResponse,
    SetEntryRequest, SetResponse, SizeResponse, StatsResponse,
};
use crate::store::{FileStore, KeyValueStore, MemoryStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ExpiringCache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: ExpiringCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens a file store when `store_path` is set, otherwise an in-memory one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => {
                info!("Using file store at {}", path.display());
                Arc::new(FileStore::open(path, config.quota())?)
            }
            None => {
                info!("Using in-memory store");
                match config.quota() {
                    Some(quota) => Arc::new(MemoryStore::with_quota(quota)),
                    None => Arc::new(MemoryStore::new()),
                }
            }
        };

        let cache = ExpiringCache::with_namespace(store, &config.prefix, &config.version)
            .with_default_ttl(config.default_ttl_ms);
        Ok(Self::new(cache))
    }
}

/// Runs `f` against the cache on the blocking pool.
async fn with_cache<F, R>(state: &AppState, f: F) -> Result<R>
where
    F: FnOnce(&ExpiringCache) -> R + Send + 'static,
    R: Send + 'static,
{
    let cache = state.cache.clone();
    Ok(tokio::task::spawn_blocking(move || f(&cache)).await?)
}

/// Handler for PUT /entries/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (data, options) = req.into_parts();
    let key = with_cache(&state, move |cache| {
        cache.set(&key, &data, options);
        key
    })
    .await?;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /entries/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup = key.clone();
    match with_cache(&state, move |cache| cache.get::<serde_json::Value>(&lookup)).await? {
        Some(data) => Ok(Json(GetResponse::new(key, data))),
        None => Err(CacheError::NotFound(format!("Key not found: {}", key))),
    }
}

/// Handler for DELETE /entries/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let key = with_cache(&state, move |cache| {
        cache.delete(&key);
        key
    })
    .await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<RemovedResponse>> {
    let removed = with_cache(&state, |cache| cache.clear()).await?;
    info!("Cleared {} entries", removed);
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let keys = with_cache(&state, |cache| cache.keys()).await?;
    Ok(Json(KeysResponse { keys }))
}

/// Handler for POST /sweep
pub async fn sweep_handler(State(state): State<AppState>) -> Result<Json<RemovedResponse>> {
    let removed = with_cache(&state, |cache| cache.clear_expired()).await?;
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Result<Json<SizeResponse>> {
    let bytes = with_cache(&state, |cache| cache.get_size()).await?;
    Ok(Json(SizeResponse { bytes }))
}

/// Handler for GET /stats
///
/// Counters live in memory, so this one stays on the async worker.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
///
/// Responds 503 when the store rejects the availability probe.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>)> {
    let available = with_cache(&state, |cache| cache.is_available()).await?;
    let status = if available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(HealthResponse::from_probe(available))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SetOptions;
    use crate::store::DisabledStore;
    use serde_json::json;

    fn memory_state() -> AppState {
        AppState::new(ExpiringCache::new(Arc::new(MemoryStore::new())))
    }

    fn set_request(data: serde_json::Value) -> SetEntryRequest {
        SetEntryRequest {
            data,
            ttl: None,
            version: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = memory_state();

        let result = set_handler(
            State(state.clone()),
            Path("user".to_string()),
            Json(set_request(json!({"id": 1}))),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("user".to_string()))
            .await
            .unwrap();
        assert_eq!(response.data, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(memory_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_invalid_key() {
        let result = set_handler(
            State(memory_state()),
            Path(" ".to_string()),
            Json(set_request(json!(1))),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_and_clear_handlers() {
        let state = memory_state();
        state.cache.set("a", &1, SetOptions::default());
        state.cache.set("b", &2, SetOptions::default());

        delete_handler(State(state.clone()), Path("a".to_string()))
            .await
            .unwrap();
        let keys = keys_handler(State(state.clone())).await.unwrap();
        assert_eq!(keys.keys, vec!["b".to_string()]);

        let cleared = clear_handler(State(state.clone())).await.unwrap();
        assert_eq!(cleared.removed, 1);
        assert_eq!(size_handler(State(state)).await.unwrap().bytes, 0);
    }

    #[tokio::test]
    async fn test_health_handler_reports_degraded_store() {
        let (status, healthy) = health_handler(State(memory_state())).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(healthy.status, "healthy");

        let state = AppState::new(ExpiringCache::new(Arc::new(DisabledStore::new("off"))));
        let (status, degraded) = health_handler(State(state)).await.unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!degraded.store_available);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cache_calls_run_off_the_runtime_thread() {
        let state = memory_state();
        let runtime_thread = std::thread::current().id();

        let cache_thread = with_cache(&state, |_| std::thread::current().id())
            .await
            .unwrap();

        assert_ne!(cache_thread, runtime_thread);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_file_store_handlers_on_single_thread_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store_path: Some(dir.path().join("cache.json")),
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();

        for i in 0..5 {
            set_handler(
                State(state.clone()),
                Path(format!("k{}", i)),
                Json(set_request(json!({"n": i}))),
            )
            .await
            .unwrap();
        }

        let cleared = clear_handler(State(state.clone())).await.unwrap();
        assert_eq!(cleared.removed, 5);
        assert!(keys_handler(State(state)).await.unwrap().keys.is_empty());
    }

    #[tokio::test]
    async fn test_from_config_uses_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store_path: Some(dir.path().join("cache.json")),
            ..Config::default()
        };

        let state = AppState::from_config(&config).unwrap();
        state.cache.set("k", "v", SetOptions::default());

        assert!(dir.path().join("cache.json").exists());
        assert_eq!(state.cache.prefix(), "app_cache_");
    }
}
