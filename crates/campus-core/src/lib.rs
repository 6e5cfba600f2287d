//! Core types for campus.
//!
//! This crate provides the foundational types shared by the campus crates:
//!
//! - **Identifiers**: `RecordId`, the opaque string id every record carries
//! - **Records**: the `Record` trait and the untyped `Document` record
//! - **Error types**: Common error definitions shared across crates
//!
//! # Example
//!
//! ```
//! use campus_core::{Document, Record, RecordId};
//!
//! let doc = Document::from_value(serde_json::json!({"name": "Petrova"}))
//!     .unwrap()
//!     .with_generated_id();
//! assert!(!doc.id().is_empty());
//!
//! let id = RecordId::new("st1");
//! assert_eq!(id.as_str(), "st1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod record;

pub use error::{CoreError, Result};
pub use ids::{IdError, RecordId};
pub use record::{Document, Record};
