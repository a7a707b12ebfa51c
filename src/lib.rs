//! repomod: Staged File-Tree Transformations
//!
//! Walks a directory tree, lets a pluggable [`transform::Transform`] decide how
//! to rewrite files, and stages every write and delete in memory. A run returns
//! the staged changes as an ordered list of [`command::ExternalFileCommand`]s;
//! nothing touches disk until the caller applies them.

pub mod api;
pub mod callbacks;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod logging;
pub mod overlay;
pub mod store;
pub mod tooling;
pub mod transform;
pub mod transforms;
pub mod tree;
pub mod types;

pub use api::{DataApi, DirectoryApi, FileApi};
pub use callbacks::{CallbackService, NoopCallbacks, TracingCallbacks};
pub use command::{
    Command, CommandKind, DataCommand, DirectoryCommand, ExecutedCommand, ExternalFileCommand,
    FileCommand, FinishCommand,
};
pub use engine::Engine;
pub use error::EngineError;
pub use overlay::OverlayFileSystem;
pub use transform::Transform;
pub use types::{Dependencies, Options, PathKey};
