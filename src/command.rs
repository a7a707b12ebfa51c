//! Command Algebra
//!
//! Closed set of commands the engine interprets. Handlers return the narrower
//! `DirectoryCommand`, `FileCommand` and `DataCommand` sets, which widen into
//! `Command` for dispatch. `ExternalFileCommand` is the only output that leaves
//! the engine.

use crate::types::Options;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Every command the dispatcher understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TraverseDirectory { path: PathBuf, options: Options },
    TraverseFile { path: PathBuf, options: Options },
    /// Read the file (through the overlay) and hand its content to the data handler
    Materialize { path: PathBuf, options: Options },
    Delete { path: PathBuf },
    StageData { path: PathBuf, data: String },
    Noop,
}

/// Commands a directory handler may return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCommand {
    TraverseDirectory { path: PathBuf, options: Options },
    TraverseFile { path: PathBuf, options: Options },
}

impl DirectoryCommand {
    pub fn directory(path: impl Into<PathBuf>, options: Options) -> Self {
        DirectoryCommand::TraverseDirectory {
            path: path.into(),
            options,
        }
    }

    pub fn file(path: impl Into<PathBuf>, options: Options) -> Self {
        DirectoryCommand::TraverseFile {
            path: path.into(),
            options,
        }
    }
}

/// Commands a file handler may return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCommand {
    Materialize { path: PathBuf, options: Options },
    Delete { path: PathBuf },
}

impl FileCommand {
    pub fn materialize(path: impl Into<PathBuf>, options: Options) -> Self {
        FileCommand::Materialize {
            path: path.into(),
            options,
        }
    }

    pub fn delete(path: impl Into<PathBuf>) -> Self {
        FileCommand::Delete { path: path.into() }
    }
}

/// Command a data handler returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataCommand {
    StageData { path: PathBuf, data: String },
    Noop,
}

impl DataCommand {
    pub fn stage(path: impl Into<PathBuf>, data: impl Into<String>) -> Self {
        DataCommand::StageData {
            path: path.into(),
            data: data.into(),
        }
    }
}

impl From<DirectoryCommand> for Command {
    fn from(command: DirectoryCommand) -> Self {
        match command {
            DirectoryCommand::TraverseDirectory { path, options } => {
                Command::TraverseDirectory { path, options }
            }
            DirectoryCommand::TraverseFile { path, options } => Command::TraverseFile { path, options },
        }
    }
}

impl From<FileCommand> for Command {
    fn from(command: FileCommand) -> Self {
        match command {
            FileCommand::Materialize { path, options } => Command::Materialize { path, options },
            FileCommand::Delete { path } => Command::Delete { path },
        }
    }
}

impl From<DataCommand> for Command {
    fn from(command: DataCommand) -> Self {
        match command {
            DataCommand::StageData { path, data } => Command::StageData { path, data },
            DataCommand::Noop => Command::Noop,
        }
    }
}

/// Decision returned once per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishCommand {
    /// Stop and drain staged changes
    Noop,
    /// Run another pass with the current state
    Repeat,
}

/// Command kind without payload, reported to progress callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    TraverseDirectory,
    TraverseFile,
    Materialize,
    Delete,
    StageData,
}

/// Progress notification for an executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub kind: CommandKind,
    pub path: PathBuf,
}

/// Final write or delete instruction for the caller to apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExternalFileCommand {
    DeleteFile { path: PathBuf },
    UpsertFile { path: PathBuf, data: String },
}

impl ExternalFileCommand {
    pub fn delete_file(path: impl Into<PathBuf>) -> Self {
        ExternalFileCommand::DeleteFile { path: path.into() }
    }

    pub fn upsert_file(path: impl Into<PathBuf>, data: impl Into<String>) -> Self {
        ExternalFileCommand::UpsertFile {
            path: path.into(),
            data: data.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExternalFileCommand::DeleteFile { path } | ExternalFileCommand::UpsertFile { path, .. } => {
                path
            }
        }
    }
}
