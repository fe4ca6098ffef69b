//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify storage, capacity, and snapshot invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::snapshot::{Snapshot, SnapshotEntry};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}"
}

/// A single cache operation for sequence testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    SetWithTtl { key: String, value: String },
    Get { key: String },
    Sweep,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::SetWithTtl { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        Just(CacheOp::Sweep),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any key-value pair, storing the pair and then retrieving it
    // (before expiration) returns the exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // For any key, storing V1 and then V2 under the same key makes get
    // return V2, and the second set returns V1.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), v1.clone());
        let previous = store.set(key.clone(), v2.clone());

        prop_assert_eq!(previous, Some(v1));
        prop_assert_eq!(store.get(&key), Some(v2));
    }

    // For any sequence of operations, the store never grows past its
    // capacity, and a second sweep right after a first removes nothing.
    #[test]
    fn prop_capacity_and_sweep_idempotence(
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
    ) {
        let capacity = 10;
        let mut store = CacheStore::new(capacity);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key, value);
                }
                CacheOp::SetWithTtl { key, value } => {
                    store.set_with_ttl(key, value, Duration::from_secs(60));
                }
                CacheOp::Get { key } => {
                    let _ = store.get(&key);
                }
                CacheOp::Sweep => {
                    store.evict_expired();
                }
            }
            prop_assert!(store.len() <= capacity, "capacity bound violated");
        }

        store.evict_expired();
        prop_assert_eq!(store.evict_expired(), 0, "sweep must be idempotent");
    }

    // For any set of distinct keys that fits under capacity, every
    // inserted key is retrievable and len matches the distinct count.
    #[test]
    fn prop_all_inserted_keys_retrievable(
        keys in prop::collection::hash_set(key_strategy(), 1..50),
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let keys: HashSet<String> = keys;

        for key in &keys {
            store.set(key.clone(), format!("value_of_{key}"));
        }

        prop_assert_eq!(store.len(), keys.len());
        for key in &keys {
            prop_assert_eq!(store.get(key), Some(format!("value_of_{key}")));
        }
    }

    // For any snapshot, serializing and deserializing the document
    // reproduces identical {key, value, expires_at} triples.
    #[test]
    fn prop_snapshot_serde_roundtrip(
        entries in prop::collection::vec(
            (key_strategy(), value_strategy(), prop::option::of(1u64..=u64::MAX / 2)),
            0..40,
        ),
    ) {
        let snapshot = Snapshot {
            capacity: TEST_MAX_ENTRIES,
            entries: entries
                .into_iter()
                .map(|(key, value, expires_at)| SnapshotEntry { key, value, expires_at })
                .collect(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot<String> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(back.capacity, snapshot.capacity);
        prop_assert_eq!(back.entries.len(), snapshot.entries.len());
        for (original, reloaded) in snapshot.entries.iter().zip(back.entries.iter()) {
            prop_assert_eq!(&reloaded.key, &original.key);
            prop_assert_eq!(&reloaded.value, &original.value);
            prop_assert_eq!(reloaded.expires_at, original.expires_at);
        }
    }
}
