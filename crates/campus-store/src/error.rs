//! Error types for the storage layer.
//!
//! Backends and the JSON codec report these; `CollectionStore` logs them and
//! falls back instead of returning them.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage cannot be used (disabled, I/O failure, lock error).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write would exceed the configured storage quota.
    #[error("storage quota exceeded writing {key}: need {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// Total bytes the store would occupy after the write.
        needed: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
