//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache contract over generated keys and values.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{ExpiringCache, SetOptions};
use crate::store::{DisabledStore, KeyValueStore, MemoryStore};

// == Strategies ==
/// Generates valid cache keys (non-empty)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates JSON payloads of mixed shape
fn json_value_strategy() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-zA-Z0-9 ]{0,32}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
            prop::collection::hash_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: i64 },
    Get { key: String },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), any::<i64>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
        Just(CacheOp::Clear),
    ]
}

fn memory_cache(prefix: &str) -> (Arc<MemoryStore>, ExpiringCache) {
    let store = Arc::new(MemoryStore::new());
    let cache = ExpiringCache::with_namespace(store.clone(), prefix, "1.0.0");
    (store, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value then reading it before expiry returns the same value.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in json_value_strategy()) {
        let (_, cache) = memory_cache("app_");

        cache.set(&key, &value, SetOptions::default());

        prop_assert_eq!(cache.get::<serde_json::Value>(&key), Some(value));
    }

    // After a delete, the key reads as absent.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in any::<i64>()) {
        let (store, cache) = memory_cache("app_");

        cache.set(&key, &value, SetOptions::default());
        prop_assert!(cache.get::<i64>(&key).is_some());

        cache.delete(&key);

        prop_assert!(cache.get::<i64>(&key).is_none());
        prop_assert!(store.is_empty());
    }

    // The latest set wins.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in any::<i64>(),
        value2 in any::<i64>()
    ) {
        let (store, cache) = memory_cache("app_");

        cache.set(&key, &value1, SetOptions::default());
        cache.set(&key, &value2, SetOptions::default());

        prop_assert_eq!(cache.get::<i64>(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // A key written under one prefix is invisible under another.
    #[test]
    fn prop_namespace_isolation(key in valid_key_strategy(), value in any::<i64>()) {
        let store = Arc::new(MemoryStore::new());
        let p1 = ExpiringCache::with_namespace(store.clone(), "p1_", "1.0.0");
        let p2 = ExpiringCache::with_namespace(store.clone(), "p2_", "1.0.0");

        p1.set(&key, &value, SetOptions::default());

        prop_assert!(p2.get::<i64>(&key).is_none());
        prop_assert_eq!(p2.get_size(), 0);
        prop_assert_eq!(p1.get::<i64>(&key), Some(value));
    }

    // Every physical key written by the cache starts with its prefix.
    #[test]
    fn prop_writes_stay_under_prefix(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let (store, cache) = memory_cache("ns_");

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(&key, &value, SetOptions::default()),
                CacheOp::Get { key } => { let _ = cache.get::<i64>(&key); }
                CacheOp::Delete { key } => cache.delete(&key),
                CacheOp::Clear => { cache.clear(); }
            }
        }

        for key in store.keys().unwrap() {
            prop_assert!(key.starts_with("ns_"), "stray key {}", key);
        }
    }

    // The cache agrees with a plain map model under any op sequence.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (_, cache) = memory_cache("m_");
        let mut model: HashMap<String, i64> = HashMap::new();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(&key, &value, SetOptions::default());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let got = cache.get::<i64>(&key);
                    prop_assert_eq!(got, model.get(&key).copied());
                    if got.is_some() { expected_hits += 1 } else { expected_misses += 1 }
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    prop_assert_eq!(cache.clear(), model.len());
                    model.clear();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(cache.keys().len(), model.len());
    }

    // A dead store never panics and always yields the safe defaults.
    #[test]
    fn prop_disabled_store_safe_defaults(ops in prop::collection::vec(cache_op_strategy(), 1..20)) {
        let cache = ExpiringCache::new(Arc::new(DisabledStore::new("disabled")));

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(&key, &value, SetOptions::default()),
                CacheOp::Get { key } => {
                    prop_assert!(cache.get::<i64>(&key).is_none());
                }
                CacheOp::Delete { key } => cache.delete(&key),
                CacheOp::Clear => {
                    prop_assert_eq!(cache.clear(), 0);
                }
            }
        }

        prop_assert_eq!(cache.clear_expired(), 0);
        prop_assert_eq!(cache.get_size(), 0);
        prop_assert!(!cache.is_available());
    }
}
