//! Common error types for campus.
//!
//! This module provides shared error types that are used across multiple crates.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur throughout the campus crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record carried an unusable identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] crate::ids::IdError),

    /// A value was expected to be a JSON object with an `id` field.
    #[error("not a record: {0}")]
    NotARecord(String),
}
