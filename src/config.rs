//! Configuration Module
//!
//! Construction-time parameters for the cache and its maintenance tasks.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be loaded from environment variables with sensible
/// defaults, or built directly.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Initial pre-sizing of the underlying map
    pub initial_capacity: usize,
    /// Advisory hash-table load factor; the std HashMap ignores it
    pub load_factor: f64,
    /// Soft upper bound on the number of entries
    pub max_entries: usize,
    /// Directory holding the durable snapshot; must exist
    pub snapshot_dir: PathBuf,
    /// Snapshot file name inside `snapshot_dir`
    pub snapshot_file: String,
    /// Interval between expiry sweeps
    pub sweep_interval: Duration,
    /// Interval between snapshot writes
    pub snapshot_interval: Duration,
}

impl CacheConfig {
    /// Creates a CacheConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `INITIAL_CAPACITY` - Initial map pre-sizing (default: 16)
    /// - `LOAD_FACTOR` - Advisory load factor (default: 0.75)
    /// - `MAX_ENTRIES` - Soft capacity bound (default: 10000)
    /// - `SNAPSHOT_DIR` - Snapshot directory (default: ".")
    /// - `SNAPSHOT_FILE` - Snapshot file name (default: "local_cache.json")
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 10)
    /// - `SNAPSHOT_INTERVAL` - Snapshot frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_capacity: env::var("INITIAL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.initial_capacity),
            load_factor: env::var("LOAD_FACTOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.load_factor),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            snapshot_dir: env::var("SNAPSHOT_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
            snapshot_file: env::var("SNAPSHOT_FILE")
                .ok()
                .unwrap_or(defaults.snapshot_file),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            snapshot_interval: env::var("SNAPSHOT_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.snapshot_interval),
        }
    }

    /// Checks the configuration for values the cache cannot work with.
    ///
    /// Fails with [`CacheError::Configuration`] when `max_entries` is zero
    /// or the snapshot directory does not exist. Constructing against a
    /// missing directory fails here, up front, instead of on the first
    /// background save.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::Configuration(
                "max_entries must be greater than zero".to_string(),
            ));
        }

        if !self.snapshot_dir.is_dir() {
            return Err(CacheError::Configuration(format!(
                "snapshot directory does not exist: {}",
                self.snapshot_dir.display()
            )));
        }

        Ok(())
    }

    /// Returns the full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_dir.join(&self.snapshot_file)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            load_factor: 0.75,
            max_entries: 10_000,
            snapshot_dir: PathBuf::from("."),
            snapshot_file: "local_cache.json".to_string(),
            sweep_interval: Duration::from_secs(10),
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.snapshot_file, "local_cache.json");
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
        assert_eq!(config.snapshot_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_config_validate_ok() {
        let config = CacheConfig {
            snapshot_dir: std::env::temp_dir(),
            ..CacheConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_missing_dir() {
        let config = CacheConfig {
            snapshot_dir: PathBuf::from("/definitely/not/a/real/dir"),
            ..CacheConfig::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_config_validate_zero_capacity() {
        let config = CacheConfig {
            max_entries: 0,
            snapshot_dir: std::env::temp_dir(),
            ..CacheConfig::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_config_snapshot_path() {
        let config = CacheConfig {
            snapshot_dir: PathBuf::from("/tmp/cache"),
            snapshot_file: "snap.json".to_string(),
            ..CacheConfig::default()
        };
        assert_eq!(config.snapshot_path(), PathBuf::from("/tmp/cache/snap.json"));
    }
}
