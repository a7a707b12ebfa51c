use super::Discovery;
use crate::api::FileApi;
use crate::command::FileCommand;
use crate::transform::Transform;
use crate::types::Options;
use async_trait::async_trait;
use std::path::Path;

/// Deletes every discovered file
#[derive(Debug, Clone)]
pub struct RemoveTransform {
    discovery: Discovery,
}

impl RemoveTransform {
    pub fn new(discovery: Discovery) -> Self {
        Self { discovery }
    }
}

#[async_trait]
impl Transform for RemoveTransform {
    type State = ();

    fn include_patterns(&self) -> &[String] {
        &self.discovery.include
    }

    fn exclude_patterns(&self) -> &[String] {
        &self.discovery.exclude
    }

    async fn handle_file(
        &self,
        _api: &FileApi<'_>,
        path: &Path,
        _options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<Vec<FileCommand>> {
        Ok(vec![FileCommand::delete(path)])
    }
}
