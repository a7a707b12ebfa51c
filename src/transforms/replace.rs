use super::Discovery;
use crate::api::DataApi;
use crate::command::DataCommand;
use crate::transform::Transform;
use crate::types::Options;
use async_trait::async_trait;
use std::path::Path;

/// Replaces every occurrence of a string in each discovered file
#[derive(Debug, Clone)]
pub struct ReplaceTransform {
    discovery: Discovery,
    from: String,
    to: String,
}

impl ReplaceTransform {
    pub fn new(discovery: Discovery, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            discovery,
            from: from.into(),
            to: to.into(),
        }
    }
}

#[async_trait]
impl Transform for ReplaceTransform {
    type State = ();

    fn include_patterns(&self) -> &[String] {
        &self.discovery.include
    }

    fn exclude_patterns(&self) -> &[String] {
        &self.discovery.exclude
    }

    async fn handle_data(
        &self,
        _api: &DataApi<'_>,
        path: &Path,
        data: &str,
        _options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<DataCommand> {
        // an empty needle matches everywhere
        if self.from.is_empty() || !data.contains(&self.from) {
            return Ok(DataCommand::Noop);
        }
        Ok(DataCommand::stage(path, data.replace(&self.from, &self.to)))
    }
}
