use repomod::fs::{HostFileSystem, WalkdirGlob};
use repomod::transforms::{Discovery, RenameExtensionTransform};
use repomod::{Engine, ExternalFileCommand, Options, OverlayFileSystem};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn rename_plan_over_a_real_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::create_dir_all(root.join("pages")).unwrap();
    fs::create_dir_all(root.join("node_modules/lib")).unwrap();
    fs::write(root.join("pages/index.html"), "<main/>").unwrap();
    fs::write(root.join("pages/about.html"), "<about/>").unwrap();
    fs::write(root.join("node_modules/lib/vendor.html"), "<v/>").unwrap();

    let overlay = Arc::new(OverlayFileSystem::new(
        Arc::new(HostFileSystem),
        Arc::new(WalkdirGlob),
    ));
    let transform = RenameExtensionTransform::new(
        Discovery::new(
            vec!["**/*.html".to_string()],
            vec!["**/node_modules".to_string()],
        ),
        "html",
        "tsx",
    );

    let commands = Engine::new(overlay, transform)
        .execute(&root, &Options::new())
        .await
        .unwrap();

    assert_eq!(
        commands,
        vec![
            ExternalFileCommand::delete_file(root.join("pages/about.html")),
            ExternalFileCommand::upsert_file(root.join("pages/about.tsx"), "<about/>"),
            ExternalFileCommand::delete_file(root.join("pages/index.html")),
            ExternalFileCommand::upsert_file(root.join("pages/index.tsx"), "<main/>"),
        ]
    );
    assert!(root.join("pages/index.html").exists());
    assert!(!root.join("pages/index.tsx").exists());
}

#[tokio::test]
async fn single_file_root() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("only.html");
    fs::write(&file, "<x/>").unwrap();

    let transform =
        RenameExtensionTransform::new(Discovery::new(Vec::new(), Vec::new()), "html", "vue");
    let commands = Engine::new(Arc::new(OverlayFileSystem::host()), transform)
        .execute(&file, &Options::new())
        .await
        .unwrap();

    assert_eq!(
        commands,
        vec![
            ExternalFileCommand::delete_file(&file),
            ExternalFileCommand::upsert_file(temp_dir.path().join("only.vue"), "<x/>"),
        ]
    );
}
