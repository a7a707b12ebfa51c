use async_trait::async_trait;
use repomod::{
    CommandKind, DataApi, DataCommand, Engine, ExternalFileCommand, Options, Transform,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::integration::support::{memory_overlay, RecordingCallbacks};

struct UppercaseDocs {
    include: Vec<String>,
    exclude: Vec<String>,
}

#[async_trait]
impl Transform for UppercaseDocs {
    type State = ();

    fn include_patterns(&self) -> &[String] {
        &self.include
    }

    fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    async fn handle_data(
        &self,
        _api: &DataApi<'_>,
        path: &Path,
        data: &str,
        _options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<DataCommand> {
        Ok(DataCommand::stage(path, data.to_uppercase()))
    }
}

#[tokio::test]
async fn discover_returns_matching_files_once_and_classifies_them() {
    let (_fs, overlay) = memory_overlay(&[
        ("/repo/README.md", "r"),
        ("/repo/run.sh", "s"),
        ("/repo/docs/guide.md", "g"),
        ("/repo/src/main.rs", "m"),
    ]);

    let found = overlay
        .discover(
            Path::new("/repo"),
            &["**/*.{md,sh}".to_string(), "**/*.md".to_string()],
            &[],
        )
        .await
        .unwrap();

    assert_eq!(
        found,
        vec![
            PathBuf::from("/repo/README.md"),
            PathBuf::from("/repo/docs/guide.md"),
            PathBuf::from("/repo/run.sh"),
        ]
    );
    for path in &found {
        assert!(overlay.exists(path));
        assert!(!overlay.is_directory(path));
    }
    assert!(!overlay.exists(Path::new("/repo/src/main.rs")));
}

#[tokio::test]
async fn include_patterns_replace_the_default_directory_walk() {
    let (_fs, overlay) = memory_overlay(&[
        ("/repo/a.md", "a"),
        ("/repo/node_modules/pkg/b.md", "b"),
        ("/repo/src/c.rs", "c"),
    ]);
    let callbacks = Arc::new(RecordingCallbacks::default());
    let transform = UppercaseDocs {
        include: vec!["**/*.md".to_string()],
        exclude: vec!["**/node_modules".to_string()],
    };

    let commands = Engine::new(overlay, transform)
        .with_callbacks(callbacks.clone())
        .execute(Path::new("/repo"), &Options::new())
        .await
        .unwrap();

    assert_eq!(commands, vec![ExternalFileCommand::upsert_file("/repo/a.md", "A")]);
    assert_eq!(
        callbacks.executed_kinds(CommandKind::TraverseFile),
        vec![PathBuf::from("/repo/a.md")]
    );
    assert_eq!(
        callbacks.executed_kinds(CommandKind::TraverseDirectory),
        vec![PathBuf::from("/repo")]
    );
}
