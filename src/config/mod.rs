//! Configuration
//!
//! Layered settings: built-in defaults, an optional `tabpage.toml` in the
//! data directory (or an explicit file), then `TABPAGE_*` environment
//! variables with `__` separating nested keys.

pub mod facade;
mod merge;
pub mod paths;
mod sources;
pub mod storage_paths;

pub use facade::ConfigLoader;
pub use storage_paths::{ResolvedPaths, StorageConfig};

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the optional config file looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "tabpage.toml";

/// Environment variable prefix for config overrides.
pub const ENV_PREFIX: &str = "TABPAGE";

fn default_max_upload_bytes() -> u64 {
    16 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["csv".to_string()]
}

fn default_sniff_bytes() -> usize {
    1024
}

fn default_page_size() -> u64 {
    10
}

fn default_preview_rows() -> usize {
    10
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Accepted filename extensions, compared case-insensitively
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// How many leading bytes the content sniffer inspects
    #[serde(default = "default_sniff_bytes")]
    pub sniff_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
            sniff_bytes: default_sniff_bytes(),
        }
    }
}

/// Paging defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Rows sampled at registration and returned as a preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            preview_rows: default_preview_rows(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabpageConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TabpageConfig {
    /// Reject settings the catalog cannot operate with.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.limits.max_upload_bytes == 0 {
            return Err(ApiError::ConfigError(
                "limits.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.limits.allowed_extensions.is_empty() {
            return Err(ApiError::ConfigError(
                "limits.allowed_extensions must list at least one extension".to_string(),
            ));
        }
        if self.paging.default_page_size == 0 {
            return Err(ApiError::ConfigError(
                "paging.default_page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
