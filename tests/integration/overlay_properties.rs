use proptest::prelude::*;
use repomod::command::ExternalFileCommand;
use repomod::fs::MemoryFileSystem;
use repomod::{EngineError, OverlayFileSystem};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Write(usize, String),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, "[a-z]{0,8}").prop_map(|(i, s)| Op::Write(i, s)),
        (0..6usize).prop_map(Op::Delete),
    ]
}

fn file_path(index: usize) -> PathBuf {
    PathBuf::from(format!("/w/f{}.txt", index))
}

proptest! {
    #[test]
    fn staged_operations_read_back_and_drain_once(ops in prop::collection::vec(op(), 1..40)) {
        let rt = runtime();
        let fs = Arc::new(
            MemoryFileSystem::from_files((0..6).map(|i| (file_path(i), "original"))).unwrap(),
        );
        let overlay = OverlayFileSystem::in_memory(fs);

        let mut last: HashMap<PathBuf, Option<String>> = HashMap::new();
        for op in &ops {
            match op {
                Op::Write(i, data) => {
                    overlay.stage_write(&file_path(*i), data.clone());
                    last.insert(file_path(*i), Some(data.clone()));
                }
                Op::Delete(i) => {
                    overlay.stage_delete(&file_path(*i));
                    last.insert(file_path(*i), None);
                }
            }
        }

        for (path, expected) in &last {
            let read = rt.block_on(overlay.read_file(path));
            match expected {
                Some(data) => {
                    prop_assert_eq!(&read.unwrap(), data);
                }
                None => {
                    prop_assert!(matches!(read, Err(EngineError::FileDeleted(_))));
                }
            }
        }

        let drained = overlay.external_file_commands();
        prop_assert_eq!(drained.len(), last.len());
        for command in &drained {
            match (command, &last[command.path()]) {
                (ExternalFileCommand::UpsertFile { data, .. }, Some(expected)) => {
                    prop_assert_eq!(data, expected);
                }
                (ExternalFileCommand::DeleteFile { .. }, None) => {}
                (command, expected) => {
                    prop_assert!(false, "{:?} does not match {:?}", command, expected);
                }
            }
        }
    }

    #[test]
    fn listing_only_grows(first in prop::collection::btree_set("[a-z]{1,6}", 0..6),
                          second in prop::collection::btree_set("[a-z]{1,6}", 0..6)) {
        let rt = runtime();
        let fs = Arc::new(MemoryFileSystem::new());
        fs.create_dir_all("/d").unwrap();
        for name in &first {
            fs.write_file(format!("/d/{}", name), "").unwrap();
        }
        let overlay = OverlayFileSystem::in_memory(fs.clone());

        let before = rt.block_on(overlay.read_directory(Path::new("/d"))).unwrap();
        for name in &second {
            fs.write_file(format!("/d/{}", name), "").unwrap();
        }
        for name in &first {
            fs.remove(format!("/d/{}", name)).unwrap();
        }
        let after = rt.block_on(overlay.read_directory(Path::new("/d"))).unwrap();

        prop_assert!(before.iter().all(|path| after.contains(path)));
        for name in &second {
            let joined = Path::new("/d").join(name);
            prop_assert!(after.contains(&joined));
        }
    }
}
