//! Background Tasks Module
//!
//! Periodic maintenance that runs concurrently with foreground traffic.
//!
//! # Tasks
//! - Expiry sweeper: removes expired cache entries at configured intervals
//! - Snapshot writer: persists the cache contents to the durable store

mod coordinator;
mod snapshot;
mod sweeper;

pub use coordinator::MaintenanceCoordinator;
pub use snapshot::spawn_snapshot_task;
pub use sweeper::spawn_sweeper_task;
