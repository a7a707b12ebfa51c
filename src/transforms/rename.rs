use super::Discovery;
use crate::api::{DataApi, FileApi};
use crate::command::{DataCommand, FileCommand};
use crate::transform::Transform;
use crate::types::Options;
use async_trait::async_trait;
use std::path::Path;

/// Option key carrying the source file's content to the renamed target
pub const CONTENT_OPTION: &str = "rename.content";

/// Moves every discovered `*.from` file to `*.to`, keeping its content
///
/// The file handler reads the source, deletes it and materializes the new
/// path with the content in its options; the new path usually does not exist
/// yet, so the data handler stages the carried content rather than `data`.
#[derive(Debug, Clone)]
pub struct RenameExtensionTransform {
    discovery: Discovery,
    from: String,
    to: String,
}

impl RenameExtensionTransform {
    /// Extensions are given without the leading dot.
    pub fn new(discovery: Discovery, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into().trim_start_matches('.').to_string();
        let to = to.into().trim_start_matches('.').to_string();
        Self { discovery, from, to }
    }
}

#[async_trait]
impl Transform for RenameExtensionTransform {
    type State = ();

    fn include_patterns(&self) -> &[String] {
        &self.discovery.include
    }

    fn exclude_patterns(&self) -> &[String] {
        &self.discovery.exclude
    }

    async fn handle_file(
        &self,
        api: &FileApi<'_>,
        path: &Path,
        options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<Vec<FileCommand>> {
        if path.extension().and_then(|ext| ext.to_str()) != Some(self.from.as_str()) {
            return Ok(Vec::new());
        }

        let target = path.with_extension(&self.to);
        if api.classify(&target).await.is_some() {
            anyhow::bail!("{} already exists", target.display());
        }

        let content = api.read_file(path).await?;
        let mut options = options.clone();
        options.insert(CONTENT_OPTION.to_string(), content);

        Ok(vec![
            FileCommand::delete(path),
            FileCommand::materialize(target, options),
        ])
    }

    async fn handle_data(
        &self,
        _api: &DataApi<'_>,
        path: &Path,
        _data: &str,
        options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<DataCommand> {
        Ok(match options.get(CONTENT_OPTION) {
            Some(content) => DataCommand::stage(path, content.clone()),
            None => DataCommand::Noop,
        })
    }
}
