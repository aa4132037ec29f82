//! MergeService: orchestrates sources, applies merge policy, deserializes to TabpageConfig.

use crate::config::sources::{data_dir_file, environment};
use crate::config::TabpageConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a data directory.
    /// Precedence: defaults (lowest) -> data dir file -> environment (highest).
    pub fn load(data_dir: &Path) -> Result<TabpageConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = data_dir_file::add_to_builder(builder, data_dir)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TabpageConfig, ConfigError> {
        use config::File;

        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
