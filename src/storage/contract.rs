use crate::error::StorageError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Size and modification time of a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Flat store of named byte blobs. Names are already sanitized.
pub trait ByteStore: Send + Sync {
    /// On-disk location of `name`, for readers that scan in place.
    fn resolve(&self, name: &str) -> PathBuf;
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;
    fn exists(&self, name: &str) -> bool;
    fn delete(&self, name: &str) -> Result<(), StorageError>;
    fn list(&self) -> Result<Vec<String>, StorageError>;
    fn stat(&self, name: &str) -> Result<FileStat, StorageError>;
}
