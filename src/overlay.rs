//! Overlay Filesystem
//!
//! Caching and staging layer in front of a read-only `FileSystem`. Stat results
//! are memoized per `PathKey`, directory children accumulate in a relation
//! index, and every write or delete is staged in memory until the caller asks
//! for the external command list.
//!
//! All state sits behind one mutex that is never held across an await.

use crate::command::ExternalFileCommand;
use crate::error::EngineError;
use crate::fs::{FileSystem, Glob, HostFileSystem, MemoryFileSystem, WalkdirGlob};
use crate::store::{Change, ChangeStage, EntryCache, RelationIndex};
use crate::tree::hasher::{Blake3PathHasher, PathHasher};
use crate::tree::node::{Entry, EntryKind};
use crate::types::PathKey;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct OverlayState {
    entries: EntryCache,
    relations: RelationIndex,
    changes: ChangeStage,
}

/// Sizes of the overlay's stores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    pub entries: usize,
    pub listed_directories: usize,
    pub staged_changes: usize,
}

pub struct OverlayFileSystem {
    fs: Arc<dyn FileSystem>,
    glob: Arc<dyn Glob>,
    hasher: Arc<dyn PathHasher>,
    state: Mutex<OverlayState>,
}

impl OverlayFileSystem {
    pub fn new(fs: Arc<dyn FileSystem>, glob: Arc<dyn Glob>) -> Self {
        Self {
            fs,
            glob,
            hasher: Arc::new(Blake3PathHasher),
            state: Mutex::new(OverlayState::default()),
        }
    }

    /// Overlay on the host filesystem with `walkdir` discovery
    pub fn host() -> Self {
        Self::new(Arc::new(HostFileSystem), Arc::new(WalkdirGlob))
    }

    /// Overlay on an in-memory filesystem, which also serves discovery
    pub fn in_memory(fs: Arc<MemoryFileSystem>) -> Self {
        Self::new(fs.clone(), fs)
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PathHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn path_key(&self, path: &Path) -> PathKey {
        self.hasher.hash(path)
    }

    /// Classify `path` as a directory
    ///
    /// A cached entry is returned as-is, whatever its kind; otherwise the path is
    /// stat'ed and cached only if it is a directory.
    pub async fn classify_directory(&self, path: &Path) -> Option<Entry> {
        self.classify(path, EntryKind::Directory).await
    }

    /// Classify `path` as a file; same caching rules as `classify_directory`.
    pub async fn classify_file(&self, path: &Path) -> Option<Entry> {
        self.classify(path, EntryKind::File).await
    }

    /// Classify as a directory, falling back to a file.
    pub async fn classify_entry(&self, path: &Path) -> Option<Entry> {
        if let Some(entry) = self.classify_directory(path).await {
            return Some(entry);
        }
        self.classify_file(path).await
    }

    async fn classify(&self, path: &Path, kind: EntryKind) -> Option<Entry> {
        let key = self.path_key(path);
        let cached = self.state.lock().entries.get(&key).cloned();
        if cached.is_some() {
            return cached;
        }

        let stat = match self.fs.stat(path).await {
            Ok(stat) => stat,
            Err(err) => {
                debug!("Classification miss for {}: {}", path.display(), err);
                return None;
            }
        };

        let entry = match kind {
            EntryKind::Directory if stat.is_directory => Entry::directory(path),
            EntryKind::File if stat.is_file => Entry::file(path),
            _ => return None,
        };

        Some(self.state.lock().entries.get_or_insert(key, entry))
    }

    /// List a directory
    ///
    /// Re-lists through the collaborator on every call, records each child, and
    /// returns every child ever seen under `path` during this run, including
    /// children that have since disappeared from the real listing.
    pub async fn read_directory(&self, path: &Path) -> Result<Vec<PathBuf>, EngineError> {
        let parent = self.path_key(path);
        let listing = self
            .fs
            .read_dir(path)
            .await
            .map_err(|e| EngineError::io(path, e))?;

        let mut state = self.state.lock();
        for child in listing {
            let child_path = path.join(&child.name);
            let entry = if child.is_directory {
                Entry::directory(child_path)
            } else if child.is_file {
                Entry::file(child_path)
            } else {
                continue;
            };
            let key = self.path_key(entry.path());
            state.relations.upsert(parent, key);
            state.entries.upsert(key, entry);
        }

        let children = state
            .relations
            .children_of(&parent)
            .iter()
            .filter_map(|key| state.entries.get(key).map(|entry| entry.path().to_path_buf()))
            .collect();
        Ok(children)
    }

    /// Read a file, staged content first
    ///
    /// Reading a path staged for deletion is an error. A real read that fails
    /// yields empty content.
    pub async fn read_file(&self, path: &Path) -> Result<String, EngineError> {
        let key = self.path_key(path);
        let staged = self.state.lock().changes.get(&key).cloned();

        match staged {
            Some(Change::Upsert(data)) => Ok(data),
            Some(Change::Delete) => Err(EngineError::FileDeleted(path.to_path_buf())),
            None => match self.fs.read_to_string(path).await {
                Ok(content) => Ok(content),
                Err(err) => {
                    debug!("Reading {} as empty: {}", path.display(), err);
                    Ok(String::new())
                }
            },
        }
    }

    /// Cache-only: true if `path` has been classified as a directory.
    pub fn is_directory(&self, path: &Path) -> bool {
        let key = self.path_key(path);
        self.state.lock().entries.kind_of(&key) == Some(EntryKind::Directory)
    }

    /// Cache-only: true if `path` has been classified at all.
    pub fn exists(&self, path: &Path) -> bool {
        let key = self.path_key(path);
        self.state.lock().entries.contains(&key)
    }

    /// Find files under `directory` matching any include pattern
    ///
    /// Globs once per include pattern and unions the results in order without
    /// duplicates. Each result is recorded as a file, replacing any earlier
    /// classification. The relation index is not touched.
    pub async fn discover(
        &self,
        directory: &Path,
        include: &[String],
        exclude: &[String],
    ) -> Result<Vec<PathBuf>, EngineError> {
        let mut discovered: IndexMap<PathKey, PathBuf> = IndexMap::new();
        for pattern in include {
            for path in self.glob.glob(directory, pattern, exclude).await? {
                let key = self.path_key(&path);
                discovered.entry(key).or_insert(path);
            }
        }

        let mut state = self.state.lock();
        for (key, path) in &discovered {
            state.entries.upsert(*key, Entry::file(path.clone()));
        }
        Ok(discovered.into_values().collect())
    }

    /// Stage `path` for deletion, recording it as a file.
    pub fn stage_delete(&self, path: &Path) {
        let key = self.path_key(path);
        let mut state = self.state.lock();
        state.entries.upsert(key, Entry::file(path));
        state.changes.delete(key);
    }

    /// Stage new content for `path`, recording it as a file.
    pub fn stage_write(&self, path: &Path, data: impl Into<String>) {
        let key = self.path_key(path);
        let mut state = self.state.lock();
        state.entries.upsert(key, Entry::file(path));
        state.changes.upsert(key, data.into());
    }

    /// One external command per staged path, in first-staged order
    ///
    /// The stage is left intact, so calling this twice yields the same list.
    pub fn external_file_commands(&self) -> Vec<ExternalFileCommand> {
        let state = self.state.lock();
        state
            .changes
            .iter()
            .filter_map(|(key, change)| {
                let path = state.entries.get(key)?.path().to_path_buf();
                Some(match change {
                    Change::Delete => ExternalFileCommand::DeleteFile { path },
                    Change::Upsert(data) => ExternalFileCommand::UpsertFile {
                        path,
                        data: data.clone(),
                    },
                })
            })
            .collect()
    }

    pub fn stats(&self) -> OverlayStats {
        let state = self.state.lock();
        OverlayStats {
            entries: state.entries.len(),
            listed_directories: state.relations.len(),
            staged_changes: state.changes.len(),
        }
    }
}
