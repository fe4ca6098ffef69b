//! Error types for the local cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the local cache.
///
/// Plain absence of a key is not an error: `get` returns `Option<V>` and
/// callers branch on it. Errors here are for operations that require a key
/// to exist, invalid construction parameters, and snapshot IO.
#[derive(Error, Debug)]
pub enum CacheError {
    /// An operation that requires an existing key was given an absent one
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Invalid construction-time configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Durable store read/write failure
    #[error("snapshot io failure: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or schema-incompatible snapshot content
    #[error("snapshot deserialization failure: {0}")]
    Deserialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the local cache.
pub type Result<T> = std::result::Result<T, CacheError>;
