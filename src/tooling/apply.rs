//! Apply a drained plan to the host filesystem.

use crate::command::ExternalFileCommand;
use crate::error::EngineError;
use serde::Serialize;
use std::io::ErrorKind;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub written: usize,
    pub deleted: usize,
    /// Deletes whose target was already gone
    pub missing: usize,
}

/// Execute commands in plan order, stopping at the first I/O failure.
///
/// Writes create missing parent directories.
pub fn apply_commands(commands: &[ExternalFileCommand]) -> Result<ApplySummary, EngineError> {
    let mut summary = ApplySummary::default();
    for command in commands {
        match command {
            ExternalFileCommand::DeleteFile { path } => match std::fs::remove_file(path) {
                Ok(()) => summary.deleted += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => summary.missing += 1,
                Err(e) => return Err(EngineError::io(path, e)),
            },
            ExternalFileCommand::UpsertFile { path, data } => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
                }
                std::fs::write(path, data).map_err(|e| EngineError::io(path, e))?;
                summary.written += 1;
            }
        }
        debug!(path = %command.path().display(), "Applied command");
    }
    Ok(summary)
}
