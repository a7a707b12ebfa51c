//! Error types for the overlay filesystem and command engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine, its collaborators, and the CLI tooling
#[derive(Debug, Error)]
pub enum EngineError {
    /// A path staged for deletion was read again
    #[error("This file has already been deleted: {0}")]
    FileDeleted(PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Directory handler failures abort the whole run
    #[error("Directory handler failed for {path}: {source}")]
    DirectoryHandler {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("State initialization failed: {0}")]
    InitializeState(#[source] anyhow::Error),

    #[error("Finish handler failed: {0}")]
    Finish(#[source] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::ConfigError(err.to_string())
    }
}
