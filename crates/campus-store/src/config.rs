//! Store configuration.
//!
//! This module defines which backend to open and where.

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::backend::{AnyBackend, MemoryBackend};
use crate::collection::CollectionStore;
use crate::error::{Result, StoreError};
use crate::rocks::RocksBackend;

/// Which backend holds the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Process memory; lost on exit.
    Memory,
    /// `RocksDB` under `data_dir`.
    #[default]
    Rocks,
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocks" | "rocksdb" => Ok(Self::Rocks),
            other => Err(StoreError::InvalidConfig(format!("unknown backend: {other}"))),
        }
    }
}

/// Configuration for the collection store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend to open.
    #[serde(default)]
    pub backend: BackendKind,

    /// Database directory for the `RocksDB` backend.
    #[serde(default = "StoreConfig::default_data_dir")]
    pub data_dir: PathBuf,

    /// Byte quota for the memory backend. Unlimited if unset.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

impl StoreConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from("campus-data")
    }

    /// Build a configuration from `CAMPUS_BACKEND`, `CAMPUS_DATA_DIR` and
    /// `CAMPUS_QUOTA_BYTES`, using defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidConfig` if a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidConfig` if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(backend) = lookup("CAMPUS_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("CAMPUS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(quota) = lookup("CAMPUS_QUOTA_BYTES") {
            let bytes = quota.trim().parse().map_err(|_| {
                StoreError::InvalidConfig(format!("CAMPUS_QUOTA_BYTES is not a number: {quota}"))
            })?;
            config.quota_bytes = Some(bytes);
        }

        Ok(config)
    }

    /// Open the configured backend and wrap it in a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the `RocksDB` directory cannot be opened.
    pub fn open(&self) -> Result<CollectionStore<AnyBackend>> {
        let backend = match self.backend {
            BackendKind::Memory => {
                tracing::info!(quota_bytes = ?self.quota_bytes, "Using in-memory store");
                AnyBackend::Memory(
                    self.quota_bytes
                        .map_or_else(MemoryBackend::new, MemoryBackend::with_quota),
                )
            }
            BackendKind::Rocks => {
                tracing::info!(path = %self.data_dir.display(), "Opening RocksDB store");
                AnyBackend::Rocks(RocksBackend::open(&self.data_dir)?)
            }
        };

        Ok(CollectionStore::new(backend))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: Self::default_data_dir(),
            quota_bytes: None,
        }
    }
}
