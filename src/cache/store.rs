//! Cache Store Module
//!
//! Main cache engine: a key/value map with per-entry TTL, a soft capacity
//! bound, and the eviction primitive the background sweeper uses.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, StatsView};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::snapshot::{Snapshot, SnapshotEntry};

// == Cache Store ==
/// In-memory key/value storage with TTL expiration.
///
/// Capacity is a soft bound enforced on growth: once the store holds
/// `max_entries` entries, inserts of brand-new keys are refused, while
/// overwrites of existing keys still succeed. Expired entries are detected
/// lazily on read and removed in bulk by [`evict_expired`].
///
/// [`evict_expired`]: CacheStore::evict_expired
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Soft upper bound on the number of entries
    max_entries: usize,
    /// Activity counters
    stats: CacheStats,
}

impl<V> CacheStore<V> {
    // == Constructors ==
    /// Creates an empty CacheStore with the given soft capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty CacheStore sized from configuration.
    ///
    /// `initial_capacity` pre-sizes the map; `load_factor` is advisory and
    /// ignored (the std HashMap manages its own load factor).
    pub fn with_config(config: &CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.initial_capacity),
            max_entries: config.max_entries,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or the entry has expired.
    /// Expiration here is lazy: the expired entry stays in the map for the
    /// next sweep, but is never returned to a caller.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair that never expires.
    ///
    /// Returns the previous value if `key` was already present. Inserting a
    /// brand-new key while the store is full is refused and returns `None`;
    /// overwriting an existing key always succeeds.
    pub fn set(&mut self, key: String, value: V) -> Option<V> {
        self.insert_entry(key, CacheEntry::new(value))
    }

    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// Same capacity rule and return value as [`set`](CacheStore::set).
    pub fn set_with_ttl(&mut self, key: String, value: V, ttl: Duration) -> Option<V> {
        self.insert_entry(key, CacheEntry::with_ttl(value, ttl))
    }

    /// Stores a key-value pair expiring at an absolute instant.
    ///
    /// Same capacity rule and return value as [`set`](CacheStore::set).
    pub fn set_expiring_at(&mut self, key: String, value: V, at: DateTime<Utc>) -> Option<V> {
        let expires_at = at.timestamp_millis().max(0) as u64;
        self.insert_entry(key, CacheEntry::expiring_at(value, expires_at))
    }

    /// Shared insert path applying the soft capacity bound.
    fn insert_entry(&mut self, key: String, entry: CacheEntry<V>) -> Option<V> {
        // Capacity blocks growth only: a new key while full is refused,
        // an overwrite of an existing key goes through.
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.stats.record_rejected_insert();
            debug!(%key, max_entries = self.max_entries, "insert refused, cache at capacity");
            return None;
        }

        self.entries.insert(key, entry).map(|old| old.value)
    }

    // == Set Expiry ==
    /// Re-arms an existing entry's expiry to `ttl` from now.
    ///
    /// Fails with [`CacheError::KeyNotFound`] if the key is absent; never
    /// creates an entry as a side effect.
    pub fn set_expiry(&mut self, key: &str, ttl: Duration) -> Result<()> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;

        entry.expires_at = Some(current_timestamp_ms() + ttl.as_millis() as u64);
        Ok(())
    }

    // == Evict Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed. Entries with no expiry are
    /// never touched. Calling this twice with no intervening writes removes
    /// nothing the second time.
    pub fn evict_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.record_expired(count as u64);
        count
    }

    // == Length ==
    /// Returns the raw entry count, with no expiry filtering.
    ///
    /// Logically expired entries that have not yet been swept are counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the configured soft capacity.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    // == Stats ==
    /// Returns a copy of the current activity counters.
    pub fn stats(&self) -> StatsView {
        self.stats.view()
    }

    // == Snapshot ==
    /// Copies the full store contents into a serializable snapshot.
    pub fn to_snapshot(&self) -> Snapshot<V>
    where
        V: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| SnapshotEntry {
                key: key.clone(),
                value: entry.value.clone(),
                expires_at: entry.expires_at,
            })
            .collect();

        Snapshot {
            capacity: self.max_entries,
            entries,
        }
    }

    /// Reconstructs a store from a snapshot.
    ///
    /// Expiry instants are absolute, so entries whose expiry passed while
    /// the snapshot sat on disk come back already expired and fall to the
    /// next sweep or lazy read.
    pub fn from_snapshot(snapshot: Snapshot<V>) -> Self {
        let mut entries = HashMap::with_capacity(snapshot.entries.len());
        for item in snapshot.entries {
            let entry = match item.expires_at {
                Some(at) => CacheEntry::expiring_at(item.value, at),
                None => CacheEntry::new(item.value),
            };
            entries.insert(item.key, entry);
        }

        Self {
            entries,
            max_entries: snapshot.capacity,
            stats: CacheStats::new(),
        }
    }
}
