//! Configuration
//!
//! Layered settings for the `repomod` binary: built-in defaults, then
//! `<root>/repomod.toml` (or the file named by `--config`), then
//! `REPOMOD__SECTION__KEY` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepomodConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Discovery settings shared by every built-in transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Exclude patterns appended to each command's `--exclude` list
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/.git".to_string(),
        "**/node_modules".to_string(),
        "**/target".to_string(),
    ]
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}
