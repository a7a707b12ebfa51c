//! Environment variable source: REPOMOD__* prefix with __ separator

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

/// `REPOMOD__LOGGING__LEVEL=debug` sets `logging.level`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("REPOMOD")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("discovery.exclude")
            .try_parsing(true),
    ))
}
