//! Built-in transforms driven by the `repomod` binary.
//!
//! Each one discovers files through its include/exclude patterns, so the
//! default directory handler never lists anything itself.

pub mod remove;
pub mod rename;
pub mod replace;

pub use remove::RemoveTransform;
pub use rename::RenameExtensionTransform;
pub use replace::ReplaceTransform;

/// Include and exclude glob patterns shared by the built-in transforms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Discovery {
    /// Everything below the root when no include pattern is given.
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        let include = if include.is_empty() {
            vec!["**/*".to_string()]
        } else {
            include
        };
        Self { include, exclude }
    }
}
