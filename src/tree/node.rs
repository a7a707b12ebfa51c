//! Classified filesystem entries

use std::path::{Path, PathBuf};

/// Entry kind without its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Cached classification of a path
///
/// Carries the path exactly as it was first classified; the cache key is
/// derived from its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File { path: PathBuf },
    Directory { path: PathBuf },
}

impl Entry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Entry::File { path: path.into() }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Entry::Directory { path: path.into() }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File { .. } => EntryKind::File,
            Entry::Directory { .. } => EntryKind::Directory,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path } | Entry::Directory { path } => path,
        }
    }
}
