//! Snapshot Persistence Module
//!
//! Serializes the full cache contents to a durable JSON file and reloads
//! them at startup. The file is overwritten on every save; only the most
//! recent snapshot survives.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Snapshot Document ==
/// Point-in-time serialized form of a cache store, sufficient to fully
/// reconstruct it.
///
/// Expiry instants are absolute Unix milliseconds, so a reloaded entry's
/// remaining TTL is shortened by however long the process was down. An
/// omitted `expires_at` encodes "never expires".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<V> {
    /// Soft capacity bound of the source store
    pub capacity: usize,
    /// All entries at the time of the snapshot
    pub entries: Vec<SnapshotEntry<V>>,
}

/// One persisted key-value pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry<V> {
    pub key: String,
    pub value: V,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

// == Snapshot Store ==
/// Handle on the durable snapshot location.
///
/// Construction validates that the configured directory exists, so a bad
/// path fails up front instead of on the first background save.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    // == Constructors ==
    /// Creates a SnapshotStore writing to `file_name` inside `dir`.
    ///
    /// Fails with [`CacheError::Configuration`] if `dir` is not an
    /// existing directory.
    pub fn new(dir: impl Into<PathBuf>, file_name: &str) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CacheError::Configuration(format!(
                "snapshot directory does not exist: {}",
                dir.display()
            )));
        }

        Ok(Self {
            path: dir.join(file_name),
        })
    }

    /// Creates a SnapshotStore from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.snapshot_dir.clone(), &config.snapshot_file)
    }

    /// Returns the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Save ==
    /// Writes a snapshot to the durable store.
    ///
    /// The document is written to a temporary sibling file and renamed
    /// into place, so a concurrent reader of the snapshot file never
    /// observes a partial write.
    pub async fn save<V: Serialize>(&self, snapshot: &Snapshot<V>) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json.as_bytes()).await?;

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(())
    }

    // == Load ==
    /// Reads the durable store and reconstructs the snapshot.
    ///
    /// Fails with [`CacheError::Io`] if the file cannot be read and with
    /// [`CacheError::Deserialization`] if the content is corrupt or
    /// schema-incompatible.
    pub async fn load<V: DeserializeOwned>(&self) -> Result<Snapshot<V>> {
        let json = fs::read_to_string(&self.path).await?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }

    // == Rehydrate ==
    /// Rebuilds a cache store from the last snapshot, falling back to a
    /// valid empty store with `fallback_capacity` if the snapshot is
    /// missing or unreadable.
    pub async fn rehydrate<V: DeserializeOwned>(&self, fallback_capacity: usize) -> CacheStore<V> {
        match self.load().await {
            Ok(snapshot) => {
                info!(
                    entries = snapshot.entries.len(),
                    path = %self.path.display(),
                    "rehydrated cache from snapshot"
                );
                CacheStore::from_snapshot(snapshot)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "snapshot load failed, starting with an empty cache"
                );
                CacheStore::new(fallback_capacity)
            }
        }
    }
}

/// Sibling temp-file path used for atomic replacement.
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}
