//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries
//! (active expiration, complementing the store's lazy read-path checks).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval` between passes, takes the write lock,
/// evicts every expired entry, and reports the resulting size. A pending
/// sleep is cancelled as soon as `shutdown` flips, but a pass that has
/// already started always runs to completion.
///
/// # Arguments
/// * `cache` - Shared cache store
/// * `interval` - Time between sweep passes
/// * `shutdown` - Receiver that ends the loop when set to `true`
pub fn spawn_sweeper_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "expiry sweeper started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => {
                    info!("expiry sweeper stopping");
                    break;
                }
            }

            let (removed, remaining) = {
                let mut guard = cache.write().await;
                let removed = guard.evict_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "expiry sweep removed entries");
            } else {
                debug!(remaining, "expiry sweep found nothing to remove");
            }
        }
    })
}
