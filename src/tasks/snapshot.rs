//! Snapshot Task
//!
//! Background task that periodically persists the cache contents to the
//! durable snapshot file.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::snapshot::SnapshotStore;

/// Spawns a background task that periodically saves the cache.
///
/// Each pass copies the store contents under the read lock, releases the
/// lock, and writes the copy out, so foreground traffic is never blocked
/// on file IO. A failed save is logged and the next scheduled attempt
/// proceeds independently; persistence failures degrade durability, not
/// availability.
///
/// # Arguments
/// * `cache` - Shared cache store
/// * `snapshots` - Durable snapshot location
/// * `interval` - Time between snapshot writes
/// * `shutdown` - Receiver that ends the loop when set to `true`
pub fn spawn_snapshot_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    snapshots: SnapshotStore,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Serialize + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            path = %snapshots.path().display(),
            "snapshot task started"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => {
                    info!("snapshot task stopping");
                    break;
                }
            }

            // Copy under the read lock, write with no lock held
            let snapshot = {
                let guard = cache.read().await;
                guard.to_snapshot()
            };

            let entries = snapshot.entries.len();
            match snapshots.save(&snapshot).await {
                Ok(()) => debug!(entries, "snapshot written"),
                Err(e) => warn!(error = %e, "snapshot save failed, retrying next interval"),
            }
        }
    })
}
