//! Base layer every merge starts from.

use crate::config::TabpageConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the serialized defaults, so every later source only
/// needs to carry the keys it overrides.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&TabpageConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
