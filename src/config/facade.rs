//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TabpageConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the data directory's config file and environment.
    pub fn load(data_dir: &Path) -> Result<TabpageConfig, ApiError> {
        let config = MergeService::load(data_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TabpageConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> TabpageConfig {
        TabpageConfig::default()
    }
}
