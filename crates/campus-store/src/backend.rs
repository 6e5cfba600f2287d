//! Key-value backends that hold collection JSON text.
//!
//! A backend only moves strings in and out and reports failures. The
//! fail-soft policy lives in [`CollectionStore`](crate::CollectionStore).

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::rocks::RocksBackend;

/// Durable string key-value storage.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected; the previous value is kept.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// List every stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory backend with an optional byte quota.
///
/// Mirrors browser local storage: usage is the sum of key and value lengths,
/// and a write that would push usage past the quota is refused.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    /// Create an empty backend with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that refuses to grow past `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Create a backend on which every call fails, as when the environment
    /// has storage turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Bytes currently in use.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled {
            return Err(StoreError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;
        let mut entries = self.entries.write();

        if let Some(limit) = self.quota_bytes {
            let current: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = current - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.check_enabled()?;
        Ok(self.entries.read().keys().cloned().collect())
    }
}

/// A backend chosen at runtime from configuration.
pub enum AnyBackend {
    /// Process-local memory.
    Memory(MemoryBackend),
    /// `RocksDB` on disk.
    Rocks(RocksBackend),
}

impl Backend for AnyBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Self::Memory(b) => b.get(key),
            Self::Rocks(b) => b.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Memory(b) => b.set(key, value),
            Self::Rocks(b) => b.set(key, value),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        match self {
            Self::Memory(b) => b.keys(),
            Self::Rocks(b) => b.keys(),
        }
    }
}
