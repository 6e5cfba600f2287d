//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksBackend` implementation of the `Backend` trait.
//! Collections live in the `collections` column family as UTF-8 JSON text.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};

use crate::backend::Backend;
use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, cf};

/// RocksDB-backed storage implementation.
pub struct RocksBackend {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksBackend {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Unavailable(format!("column family not found: {name}")))
    }

    fn decode(bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Backend for RocksBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let cf = self.cf(cf::COLLECTIONS)?;

        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .map(Self::decode)
            .transpose()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let cf = self.cf(cf::COLLECTIONS)?;

        self.db
            .put_cf(&cf, key.as_bytes(), value.as_bytes())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let cf = self.cf(cf::COLLECTIONS)?;

        let mut keys = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, _) = item.map_err(|e| StoreError::Unavailable(e.to_string()))?;
            keys.push(Self::decode(key.into_vec())?);
        }

        Ok(keys)
    }
}
