use parking_lot::Mutex;
use repomod::fs::MemoryFileSystem;
use repomod::{CallbackService, CommandKind, ExecutedCommand, OverlayFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn memory_overlay(files: &[(&str, &str)]) -> (Arc<MemoryFileSystem>, Arc<OverlayFileSystem>) {
    let fs = Arc::new(MemoryFileSystem::from_files(files.iter().copied()).unwrap());
    let overlay = Arc::new(OverlayFileSystem::in_memory(fs.clone()));
    (fs, overlay)
}

#[derive(Default)]
pub struct RecordingCallbacks {
    pub executed: Mutex<Vec<(CommandKind, PathBuf)>>,
    pub errors: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingCallbacks {
    pub fn executed_kinds(&self, kind: CommandKind) -> Vec<PathBuf> {
        self.executed
            .lock()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, path)| path.clone())
            .collect()
    }
}

impl CallbackService for RecordingCallbacks {
    fn on_command_executed(&self, command: &ExecutedCommand) {
        self.executed
            .lock()
            .push((command.kind, command.path.clone()));
    }

    fn on_error(&self, path: &Path, message: &str) {
        self.errors
            .lock()
            .push((path.to_path_buf(), message.to_string()));
    }
}
