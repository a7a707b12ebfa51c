//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::RepomodConfig;
use crate::error::EngineError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run rooted at `root`.
    pub fn load(root: &Path) -> Result<RepomodConfig, EngineError> {
        Ok(MergeService::load(root)?)
    }

    /// Load configuration from a specific file instead of the root's `repomod.toml`.
    pub fn load_from_file(path: &Path) -> Result<RepomodConfig, EngineError> {
        Ok(MergeService::load_from_file(path)?)
    }

    pub fn default() -> RepomodConfig {
        RepomodConfig::default()
    }
}
