//! Transform handlers
//!
//! A transform is the user-supplied half of a run: which files to discover and
//! what to do with each directory, file and file body. Every handler has a
//! default, so a transform overrides only the steps it cares about.

use crate::api::{DataApi, DirectoryApi, FileApi};
use crate::command::{DataCommand, DirectoryCommand, FileCommand, FinishCommand};
use crate::types::Options;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait Transform: Send + Sync {
    /// Handler-defined state threaded through one pass and replaced between passes
    type State: Send + Sync;

    /// Glob patterns discovered under every traversed directory before its handler runs.
    fn include_patterns(&self) -> &[String] {
        &[]
    }

    fn exclude_patterns(&self) -> &[String] {
        &[]
    }

    /// Whether `handle_directory` runs for traversed directories
    ///
    /// Off when the transform declares include patterns, since discovery has
    /// then already visited every matching file. Override to run a directory
    /// handler alongside discovery.
    fn handles_directories(&self) -> bool {
        self.include_patterns().is_empty()
    }

    /// Decide which children of a directory to traverse; defaults to all of them.
    async fn handle_directory(
        &self,
        api: &DirectoryApi<'_>,
        path: &Path,
        options: &Options,
        _state: Option<&Self::State>,
    ) -> anyhow::Result<Vec<DirectoryCommand>> {
        Ok(traverse_children(api, path, options).await?)
    }

    /// Decide what to do with a file; defaults to materializing it.
    async fn handle_file(
        &self,
        _api: &FileApi<'_>,
        path: &Path,
        options: &Options,
        _state: Option<&Self::State>,
    ) -> anyhow::Result<Vec<FileCommand>> {
        Ok(vec![FileCommand::materialize(path, options.clone())])
    }

    /// Turn a materialized file body into a data command; defaults to `Noop`.
    async fn handle_data(
        &self,
        _api: &DataApi<'_>,
        _path: &Path,
        _data: &str,
        _options: &Options,
        _state: Option<&Self::State>,
    ) -> anyhow::Result<DataCommand> {
        Ok(DataCommand::Noop)
    }

    /// State for the next pass; defaults to the previous pass's state.
    async fn initialize_state(
        &self,
        _options: &Options,
        previous: Option<Self::State>,
    ) -> anyhow::Result<Option<Self::State>> {
        Ok(previous)
    }

    /// Whether to stop after this pass; defaults to stopping.
    ///
    /// Returning `Repeat` forever never terminates.
    async fn handle_finish(
        &self,
        _options: &Options,
        _state: Option<&Self::State>,
    ) -> anyhow::Result<FinishCommand> {
        Ok(FinishCommand::Noop)
    }
}

/// One traverse command per listed child, directory or file by cached kind
pub async fn traverse_children(
    api: &DirectoryApi<'_>,
    path: &Path,
    options: &Options,
) -> Result<Vec<DirectoryCommand>, crate::error::EngineError> {
    let children = api.read_directory(path).await?;
    Ok(children
        .into_iter()
        .map(|child| {
            if api.is_directory(&child) {
                DirectoryCommand::directory(child, options.clone())
            } else {
                DirectoryCommand::file(child, options.clone())
            }
        })
        .collect())
}
