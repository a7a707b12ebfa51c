//! Handler API
//!
//! Capability views handed to transform handlers. Data handlers only see path
//! utilities and dependencies; file handlers can also inspect the cache and read
//! files; directory handlers can also list directories. Each wider view
//! dereferences to the narrower one.

use crate::error::EngineError;
use crate::overlay::OverlayFileSystem;
use crate::tree::node::Entry;
use crate::tree::path;
use crate::types::Dependencies;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Path utilities and caller-supplied dependencies
#[derive(Clone, Copy)]
pub struct DataApi<'a> {
    dependencies: &'a Dependencies,
}

impl<'a> DataApi<'a> {
    pub fn new(dependencies: &'a Dependencies) -> Self {
        Self { dependencies }
    }

    pub fn dependencies(&self) -> &'a Dependencies {
        self.dependencies
    }

    pub fn dirname(&self, path: &Path) -> Result<PathBuf, EngineError> {
        path::dirname(path)
    }

    pub fn basename(&self, path: &Path) -> Result<String, EngineError> {
        path::basename(path)
    }

    pub fn join(&self, base: &Path, segment: impl AsRef<Path>) -> PathBuf {
        path::join(base, segment.as_ref())
    }
}

/// Data API plus cache queries and overlay reads
#[derive(Clone, Copy)]
pub struct FileApi<'a> {
    data: DataApi<'a>,
    overlay: &'a OverlayFileSystem,
}

impl<'a> FileApi<'a> {
    pub fn new(overlay: &'a OverlayFileSystem, dependencies: &'a Dependencies) -> Self {
        Self {
            data: DataApi::new(dependencies),
            overlay,
        }
    }

    /// True only if the path was already classified as a directory.
    pub fn is_directory(&self, path: &Path) -> bool {
        self.overlay.is_directory(path)
    }

    /// True only if the path was already classified.
    pub fn exists(&self, path: &Path) -> bool {
        self.overlay.exists(path)
    }

    /// Classify `path` as a directory or file, stat'ing it on a cache miss
    ///
    /// Unlike `exists`, this sees paths the run has not visited yet.
    pub async fn classify(&self, path: &Path) -> Option<Entry> {
        self.overlay.classify_entry(path).await
    }

    /// Staged content if any, else the real content; fails for staged deletions.
    pub async fn read_file(&self, path: &Path) -> Result<String, EngineError> {
        self.overlay.read_file(path).await
    }
}

impl<'a> Deref for FileApi<'a> {
    type Target = DataApi<'a>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// File API plus directory listing
#[derive(Clone, Copy)]
pub struct DirectoryApi<'a> {
    file: FileApi<'a>,
}

impl<'a> DirectoryApi<'a> {
    pub fn new(overlay: &'a OverlayFileSystem, dependencies: &'a Dependencies) -> Self {
        Self {
            file: FileApi::new(overlay, dependencies),
        }
    }

    pub async fn read_directory(&self, path: &Path) -> Result<Vec<PathBuf>, EngineError> {
        self.file.overlay.read_directory(path).await
    }
}

impl<'a> Deref for DirectoryApi<'a> {
    type Target = FileApi<'a>;

    fn deref(&self) -> &Self::Target {
        &self.file
    }
}
