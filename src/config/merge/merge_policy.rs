//! Built-in defaults seeded into every builder, lowest precedence.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)?
        .set_default(
            "discovery.exclude",
            vec!["**/.git", "**/node_modules", "**/target"],
        )
}
