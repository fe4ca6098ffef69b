//! Local Cache - an in-process key-value cache
//!
//! Provides TTL expiration, a soft capacity bound, and periodic background
//! maintenance: an expiry sweeper and snapshot persistence to a JSON file,
//! both running concurrently with foreground traffic.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//! use local_cache::{CacheConfig, CacheStore, MaintenanceCoordinator, SnapshotStore};
//!
//! # #[tokio::main]
//! # async fn main() -> local_cache::Result<()> {
//! let config = CacheConfig::from_env();
//! config.validate()?;
//!
//! let snapshots = SnapshotStore::from_config(&config)?;
//! let store: CacheStore<String> = snapshots.rehydrate(config.max_entries).await;
//! let cache = Arc::new(RwLock::new(store));
//!
//! let maintenance = MaintenanceCoordinator::start(
//!     cache.clone(),
//!     snapshots,
//!     config.sweep_interval,
//!     config.snapshot_interval,
//! );
//!
//! cache.write().await.set("greeting".to_string(), "hello".to_string());
//! assert_eq!(cache.read().await.get("greeting"), Some("hello".to_string()));
//!
//! maintenance.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, StatsView};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use snapshot::{Snapshot, SnapshotEntry, SnapshotStore};
pub use tasks::{spawn_snapshot_task, spawn_sweeper_task, MaintenanceCoordinator};
