//! StorageConfig and resolve_paths for the upload and metadata locations.

use crate::config::paths;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_metadata_file() -> PathBuf {
    PathBuf::from("metadata.json")
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root for everything tabpage writes; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding uploaded files (relative to data_dir)
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Metadata snapshot file (relative to data_dir)
    #[serde(default = "default_metadata_file")]
    pub metadata_file: PathBuf,
}

/// Absolute locations derived from a [`StorageConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub metadata_file: PathBuf,
}

impl StorageConfig {
    /// Data directory this config points at.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::default_data_dir)
    }

    /// Resolve storage paths to actual filesystem locations.
    ///
    /// The metadata file may not live directly inside the upload directory,
    /// where listing would report it as a dataset.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths, ApiError> {
        let data_dir = self.data_dir();
        let uploads_dir = join_relative(&data_dir, &self.uploads_dir);
        let metadata_file = join_relative(&data_dir, &self.metadata_file);

        if metadata_file.parent() == Some(uploads_dir.as_path()) {
            return Err(ApiError::ConfigError(format!(
                "metadata file {} must not be inside the uploads directory {}",
                metadata_file.display(),
                uploads_dir.display()
            )));
        }

        Ok(ResolvedPaths {
            data_dir,
            uploads_dir,
            metadata_file,
        })
    }
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            uploads_dir: default_uploads_dir(),
            metadata_file: default_metadata_file(),
        }
    }
}
