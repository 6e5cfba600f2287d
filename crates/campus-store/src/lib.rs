//! Keyed collection storage for campus.
//!
//! Each collection (students, grades, messages, ...) is persisted as one JSON
//! array under one flat key. Mutations read the whole array, change it, and
//! write the whole array back.
//!
//! # Architecture
//!
//! - [`Backend`]: string key-value storage ([`MemoryBackend`], [`RocksBackend`])
//! - [`CollectionStore`]: the fail-soft read-modify-write operations
//! - [`CampusState`]: the loaded application state, seeded on first run
//!
//! # Example
//!
//! ```
//! use campus_store::{keys, seed, CollectionStore, MemoryBackend, Student};
//!
//! let store = CollectionStore::new(MemoryBackend::new());
//! store.initialize(keys::STUDENTS, &seed::students());
//!
//! let students = store.remove_by_id::<Student>(keys::STUDENTS, "st1", &[]);
//! assert!(students.iter().all(|s| s.id != "st1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod collection;
pub mod config;
pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod seed;
pub mod state;
pub mod types;

pub use backend::{AnyBackend, Backend, MemoryBackend};
pub use collection::{Collection, CollectionStore};
pub use config::{BackendKind, StoreConfig};
pub use error::{Result, StoreError};
pub use rocks::RocksBackend;
pub use state::CampusState;
pub use types::{
    AttendanceRecord, AttendanceStatus, Grade, Group, Material, MaterialKind, Message,
    ScheduleEntry, Student, Subject, Teacher,
};

pub use campus_core::{Document, Record, RecordId};
