use async_trait::async_trait;
use repomod::{
    CommandKind, DirectoryApi, DirectoryCommand, Engine, EngineError, ExternalFileCommand, FileApi,
    FileCommand, Options, Transform,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::integration::support::{memory_overlay, RecordingCallbacks};

/// Deletes every file, failing on any file named `bad.txt`
struct DeleteAllButBad;

#[async_trait]
impl Transform for DeleteAllButBad {
    type State = ();

    async fn handle_file(
        &self,
        _api: &FileApi<'_>,
        path: &Path,
        _options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<Vec<FileCommand>> {
        if path.ends_with("bad.txt") {
            anyhow::bail!("refusing {}", path.display());
        }
        Ok(vec![FileCommand::delete(path)])
    }
}

#[tokio::test]
async fn file_handler_failure_is_reported_and_siblings_continue() {
    let (_fs, overlay) = memory_overlay(&[
        ("/a/first.txt", ""),
        ("/a/bad.txt", ""),
        ("/a/last.txt", ""),
    ]);
    let callbacks = Arc::new(RecordingCallbacks::default());

    let commands = Engine::new(overlay, DeleteAllButBad)
        .with_callbacks(callbacks.clone())
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap();

    assert_eq!(
        commands,
        vec![
            ExternalFileCommand::delete_file("/a/first.txt"),
            ExternalFileCommand::delete_file("/a/last.txt"),
        ]
    );
    assert_eq!(
        *callbacks.errors.lock(),
        vec![(PathBuf::from("/a/bad.txt"), "refusing /a/bad.txt".to_string())]
    );
    assert_eq!(
        callbacks.executed_kinds(CommandKind::TraverseFile),
        vec![
            PathBuf::from("/a/first.txt"),
            PathBuf::from("/a/bad.txt"),
            PathBuf::from("/a/last.txt"),
        ]
    );
}

struct FailInNested;

#[async_trait]
impl Transform for FailInNested {
    type State = ();

    async fn handle_directory(
        &self,
        api: &DirectoryApi<'_>,
        path: &Path,
        options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<Vec<DirectoryCommand>> {
        if path.ends_with("nested") {
            anyhow::bail!("cannot list {}", path.display());
        }
        Ok(repomod::transform::traverse_children(api, path, options).await?)
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

#[tokio::test]
async fn directory_handler_failure_aborts_the_run() {
    let (_fs, overlay) = memory_overlay(&[("/a/top.txt", ""), ("/a/nested/inner.txt", "")]);
    let callbacks = Arc::new(RecordingCallbacks::default());
    let engine = Engine::new(overlay, FailInNested).with_callbacks(callbacks.clone());

    let err = engine
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap_err();

    match err {
        EngineError::DirectoryHandler { path, source } => {
            assert_eq!(path, PathBuf::from("/a/nested"));
            assert_eq!(source.to_string(), "cannot list /a/nested");
        }
        other => panic!("unexpected error: {other}"),
    }
    // nothing is handed back, even though top.txt was staged
    assert!(callbacks.errors.lock().is_empty());
    assert_eq!(engine.overlay().stats().staged_changes, 1);
}

#[tokio::test]
async fn failing_finish_is_fatal() {
    struct BadFinish;

    #[async_trait]
    impl Transform for BadFinish {
        type State = ();

        async fn handle_finish(
            &self,
            _options: &Options,
            _state: Option<&()>,
        ) -> anyhow::Result<repomod::FinishCommand> {
            anyhow::bail!("cannot decide")
        }
    }

    let (_fs, overlay) = memory_overlay(&[("/a/top.txt", "")]);
    let err = Engine::new(overlay, BadFinish)
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Finish(_)));
}
