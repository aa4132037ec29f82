//! JSON file persistence for the metadata store.

use super::{MetadataMap, MetadataStore};
use crate::error::StorageError;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Metadata store backed by one JSON document on disk.
///
/// Saves go to `<file>.tmp`, are synced, then renamed over the target so a
/// crash mid-write leaves the previous snapshot intact.
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_snapshot(&self) -> Result<Option<MetadataMap>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::IoError(e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::MetadataCorrupt(format!("{}: {}", self.path.display(), e)))
    }
}

impl MetadataStore for JsonMetadataStore {
    fn load(&self) -> MetadataMap {
        match self.read_snapshot() {
            Ok(Some(entries)) => entries,
            Ok(None) => MetadataMap::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable metadata store, starting empty: {}", e);
                MetadataMap::new()
            }
        }
    }

    fn save(&self, entries: &MetadataMap) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.temp_path();
        write_and_sync(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        if let Some(parent) = self.path.parent() {
            sync_dir(parent);
        }
        tracing::debug!(entries = entries.len(), path = %self.path.display(), "metadata saved");
        Ok(())
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

// Best effort: not every platform can fsync a directory handle.
fn sync_dir(dir: &Path) {
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
}
