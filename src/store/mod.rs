//! Metadata Store
//!
//! Durable filename -> entry mapping. The whole mapping is loaded and
//! rewritten as one unit; implementations keep no state between calls, so
//! the backing file is the single source of truth.

pub mod persistence;

pub use persistence::JsonMetadataStore;

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted facts about one registered dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub uploaded_at: DateTime<Utc>,
    pub size: u64,
    pub rows: u64,
}

/// Full snapshot of the store, keyed by filename.
pub type MetadataMap = BTreeMap<String, MetadataEntry>;

/// Metadata Store interface
///
/// `load` never fails on a missing or unreadable snapshot; it degrades to an
/// empty mapping. `save` replaces the snapshot atomically. Not safe under
/// concurrent writers.
pub trait MetadataStore: Send + Sync {
    fn load(&self) -> MetadataMap;
    fn save(&self, entries: &MetadataMap) -> Result<(), StorageError>;

    /// Insert or replace the entry for `filename`.
    fn upsert(&self, filename: &str, entry: MetadataEntry) -> Result<(), StorageError> {
        let mut entries = self.load();
        entries.insert(filename.to_string(), entry);
        self.save(&entries)
    }

    /// Remove the entry for `filename`; returns whether one existed.
    fn remove(&self, filename: &str) -> Result<bool, StorageError> {
        let mut entries = self.load();
        if entries.remove(filename).is_none() {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }
}
