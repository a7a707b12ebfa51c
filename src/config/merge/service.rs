//! MergeService: orchestrates sources, applies merge policy, deserializes to RepomodConfig.

use crate::config::sources::{environment, workspace_file};
use crate::config::RepomodConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> workspace file -> environment (highest).
    pub fn load(root: &Path) -> Result<RepomodConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// The file must exist; environment still overrides it.
    pub fn load_from_file(path: &Path) -> Result<RepomodConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
