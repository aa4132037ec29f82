use crate::error::StorageError;
use crate::storage::{ByteStore, FileStat};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Byte store rooted at a single upload directory.
pub struct LocalByteStore {
    root: PathBuf,
}

impl LocalByteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root).map_err(StorageError::IoError)
    }
}

impl ByteStore for LocalByteStore {
    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.ensure_root()?;
        std::fs::write(self.resolve(name), bytes)?;
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(name))?)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        Ok(std::fs::remove_file(self.resolve(name))?)
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.root.display(),
                        e
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => {
                    tracing::warn!("Skipping non UTF8 filename: {:?}", entry.path());
                    continue;
                }
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn stat(&self, name: &str) -> Result<FileStat, StorageError> {
        let meta = std::fs::metadata(self.resolve(name))?;
        let modified: DateTime<Utc> = meta.modified()?.into();
        Ok(FileStat {
            size: meta.len(),
            modified,
        })
    }
}
