//! Environment variable source: TABPAGE_* prefix with __ separator

use crate::config::ENV_PREFIX;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `TABPAGE_PAGING__DEFAULT_PAGE_SIZE=25` sets `paging.default_page_size`;
/// `TABPAGE_LIMITS__ALLOWED_EXTENSIONS` takes a comma separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("limits.allowed_extensions")
            .try_parsing(true),
    );
    Ok(builder)
}
