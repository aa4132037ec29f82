//! Error types
//!
//! `ApiError` is what every catalog, reader and pager operation returns.
//! `StorageError` covers the filesystem layer underneath it.

use thiserror::Error;

/// Why an upload was refused before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("no filename was provided")]
    MissingFilename,

    #[error("unsupported file extension '{extension}' (accepted: {allowed})")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("file content does not look like tabular text data")]
    UnsupportedContent,
}

/// Filesystem and persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Only ever logged; the metadata store recovers to an empty mapping.
    #[error("Metadata store is corrupt: {0}")]
    MetadataCorrupt(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Upload rejected: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Stable label for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::TooLarge { .. } => "too_large",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidArgument(_) => "invalid_argument",
            ApiError::MalformedData(_) => "malformed_data",
            ApiError::StorageError(_) => "io",
            ApiError::ConfigError(_) => "config",
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
