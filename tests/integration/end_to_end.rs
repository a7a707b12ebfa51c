use async_trait::async_trait;
use repomod::{
    DataApi, DataCommand, Engine, ExternalFileCommand, FileApi, FileCommand, Options, Transform,
};
use std::path::Path;

use crate::integration::support::memory_overlay;

/// Deletes every `.txt` file and writes `X` next to it as `<path>.bak`
struct BackupAndDelete;

#[async_trait]
impl Transform for BackupAndDelete {
    type State = ();

    async fn handle_file(
        &self,
        _api: &FileApi<'_>,
        path: &Path,
        options: &Options,
        _state: Option<&()>,
    ) -> anyhow::Result<Vec<FileCommand>> {
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            return Ok(Vec::new());
        }
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        let mut options = options.clone();
        options.insert("content".to_string(), "X".to_string());
        Ok(vec![
            FileCommand::delete(path),
            FileCommand::materialize(backup, options),
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
        Ok(match options.get("content") {
            Some(content) => DataCommand::stage(path, content.clone()),
            None => DataCommand::Noop,
        })
    }
}

#[tokio::test]
async fn backup_and_delete_drains_in_traversal_order() {
    let (_fs, overlay) = memory_overlay(&[("/a/file.txt", "one"), ("/a/b/file2.txt", "two")]);

    let commands = Engine::new(overlay, BackupAndDelete)
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap();

    assert_eq!(
        commands,
        vec![
            ExternalFileCommand::delete_file("/a/file.txt"),
            ExternalFileCommand::upsert_file("/a/file.txt.bak", "X"),
            ExternalFileCommand::delete_file("/a/b/file2.txt"),
            ExternalFileCommand::upsert_file("/a/b/file2.txt.bak", "X"),
        ]
    );
}

#[tokio::test]
async fn drain_does_not_touch_the_underlying_filesystem() {
    let (fs, overlay) = memory_overlay(&[("/a/file.txt", "one")]);

    Engine::new(overlay, BackupAndDelete)
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap();

    let fresh = repomod::OverlayFileSystem::in_memory(fs);
    assert_eq!(fresh.read_file(Path::new("/a/file.txt")).await.unwrap(), "one");
    assert!(fresh.classify_file(Path::new("/a/file.txt.bak")).await.is_none());
}

#[tokio::test]
async fn dependencies_reach_handlers() {
    struct Stamp;

    #[async_trait]
    impl Transform for Stamp {
        type State = ();

        async fn handle_data(
            &self,
            api: &DataApi<'_>,
            path: &Path,
            data: &str,
            _options: &Options,
            _state: Option<&()>,
        ) -> anyhow::Result<DataCommand> {
            let stamp = api
                .dependencies()
                .get("stamp")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow::anyhow!("missing stamp"))?;
            Ok(DataCommand::stage(path, format!("{}{}", stamp, data)))
        }
    }

    let (_fs, overlay) = memory_overlay(&[("/a/x.txt", "body")]);
    let mut dependencies = repomod::Dependencies::new();
    dependencies.insert("stamp".to_string(), serde_json::json!("// generated\n"));

    let commands = Engine::new(overlay, Stamp)
        .with_dependencies(dependencies)
        .execute(Path::new("/a"), &Options::new())
        .await
        .unwrap();
    assert_eq!(
        commands,
        vec![ExternalFileCommand::upsert_file("/a/x.txt", "// generated\nbody")]
    );
}
