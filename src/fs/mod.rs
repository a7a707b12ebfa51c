//! Filesystem collaborators
//!
//! The overlay only ever stats, lists and reads through the `FileSystem` trait,
//! and finds files by pattern through the `Glob` trait. Writes never reach a
//! collaborator: they are staged and handed back to the caller.

pub mod glob;
pub mod host;
pub mod memory;

use async_trait::async_trait;
use std::io;
use std::path::Path;

pub use self::glob::{Glob, PatternSet, WalkdirGlob};
pub use host::HostFileSystem;
pub use memory::MemoryFileSystem;

/// Result of a stat call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_file: bool,
    pub is_directory: bool,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
    pub is_directory: bool,
}

/// Read-only filesystem primitives
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Immediate children of `path`, in the order the implementation guarantees.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}
