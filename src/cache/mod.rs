//! Cache Module
//!
//! Provides in-memory key/value storage with TTL expiration and a soft
//! capacity bound.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::{CacheStats, StatsView};
pub use store::CacheStore;
