//! Maintenance Coordinator
//!
//! Owns the lifecycle of the two periodic background activities: the
//! expiry sweeper and the snapshot writer.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::CacheStore;
use crate::snapshot::SnapshotStore;
use crate::tasks::{spawn_snapshot_task, spawn_sweeper_task};

// == Maintenance Coordinator ==
/// Runs the sweeper and the snapshot writer against one shared cache
/// store, and stops them cleanly.
///
/// [`stop`](MaintenanceCoordinator::stop) cancels pending sweep/snapshot
/// triggers and then waits for both tasks, so an in-flight sweep or save
/// always finishes before it returns; no torn writes on shutdown.
#[derive(Debug)]
pub struct MaintenanceCoordinator {
    shutdown: watch::Sender<bool>,
    sweeper: JoinHandle<()>,
    snapshotter: JoinHandle<()>,
}

impl MaintenanceCoordinator {
    /// Starts both maintenance tasks at their configured intervals.
    pub fn start<V>(
        cache: Arc<RwLock<CacheStore<V>>>,
        snapshots: SnapshotStore,
        sweep_interval: Duration,
        snapshot_interval: Duration,
    ) -> Self
    where
        V: Clone + Serialize + Send + Sync + 'static,
    {
        let (shutdown, rx) = watch::channel(false);

        let sweeper = spawn_sweeper_task(cache.clone(), sweep_interval, rx.clone());
        let snapshotter = spawn_snapshot_task(cache, snapshots, snapshot_interval, rx);

        info!("maintenance coordinator started");

        Self {
            shutdown,
            sweeper,
            snapshotter,
        }
    }

    /// Signals shutdown and waits for both tasks to finish.
    pub async fn stop(self) {
        // Receivers see the flip at their next select point; a sweep or
        // save that already started runs to completion first.
        let _ = self.shutdown.send(true);

        let _ = self.sweeper.await;
        let _ = self.snapshotter.await;

        info!("maintenance coordinator stopped");
    }
}
