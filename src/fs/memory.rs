//! In-memory filesystem
//!
//! A path-keyed tree that lists children in creation order. Used to run the
//! engine against fixtures without touching disk, and as the reference
//! collaborator in tests where sibling order must be exact.

use super::glob::{Glob, PatternSet};
use super::{DirEntry, FileStat, FileSystem};
use crate::error::EngineError;
use crate::tree::path::normalize_path;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum MemoryNode {
    File(String),
    Directory,
}

/// In-memory filesystem rooted at `/`
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: RwLock<IndexMap<PathBuf, MemoryNode>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(PathBuf::from("/"), MemoryNode::Directory);
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    /// Build a filesystem from `(path, content)` pairs, creating parents as needed.
    pub fn from_files<I, P, S>(files: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: Into<String>,
    {
        let fs = Self::new();
        for (path, content) in files {
            fs.write_file(path, content)?;
        }
        Ok(fs)
    }

    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = normalize_path(path.as_ref());
        let mut nodes = self.nodes.write();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            match nodes.get(&current) {
                Some(MemoryNode::Directory) => {}
                Some(MemoryNode::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("ENOTDIR: not a directory, {}", current.display()),
                    ));
                }
                None => {
                    nodes.insert(current.clone(), MemoryNode::Directory);
                }
            }
        }
        Ok(())
    }

    pub fn write_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> io::Result<()> {
        let path = normalize_path(path.as_ref());
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }

        let mut nodes = self.nodes.write();
        if let Some(MemoryNode::Directory) = nodes.get(&path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("EISDIR: illegal operation on a directory, {}", path.display()),
            ));
        }
        nodes.insert(path, MemoryNode::File(content.into()));
        Ok(())
    }

    /// Remove a file or a directory with everything beneath it.
    pub fn remove(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = normalize_path(path.as_ref());
        let mut nodes = self.nodes.write();
        if nodes.shift_remove(&path).is_none() {
            return Err(not_found(&path));
        }
        nodes.retain(|candidate, _| !candidate.starts_with(&path));
        Ok(())
    }

    fn files_under(&self, root: &Path) -> Vec<PathBuf> {
        let nodes = self.nodes.read();
        let mut files: Vec<PathBuf> = nodes
            .iter()
            .filter(|(path, node)| matches!(node, MemoryNode::File(_)) && path.starts_with(root))
            .map(|(path, _)| path.clone())
            .collect();
        // component-wise ordering, i.e. a depth-first walk with name-sorted siblings
        files.sort();
        files
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("ENOENT: no such file or directory, {}", path.display()),
    )
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let path = normalize_path(path);
        match self.nodes.read().get(&path) {
            Some(MemoryNode::File(_)) => Ok(FileStat {
                is_file: true,
                is_directory: false,
            }),
            Some(MemoryNode::Directory) => Ok(FileStat {
                is_file: false,
                is_directory: true,
            }),
            None => Err(not_found(&path)),
        }
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = normalize_path(path);
        let nodes = self.nodes.read();
        match nodes.get(&path) {
            Some(MemoryNode::Directory) => {}
            Some(MemoryNode::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("ENOTDIR: not a directory, {}", path.display()),
                ));
            }
            None => return Err(not_found(&path)),
        }

        Ok(nodes
            .iter()
            .filter(|(candidate, _)| candidate.parent() == Some(path.as_path()))
            .filter_map(|(candidate, node)| {
                let name = candidate.file_name()?.to_string_lossy().into_owned();
                let is_directory = matches!(node, MemoryNode::Directory);
                Some(DirEntry {
                    name,
                    is_file: !is_directory,
                    is_directory,
                })
            })
            .collect())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let path = normalize_path(path);
        match self.nodes.read().get(&path) {
            Some(MemoryNode::File(content)) => Ok(content.clone()),
            Some(MemoryNode::Directory) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("EISDIR: illegal operation on a directory, read {}", path.display()),
            )),
            None => Err(not_found(&path)),
        }
    }
}

#[async_trait]
impl Glob for MemoryFileSystem {
    async fn glob(
        &self,
        cwd: &Path,
        pattern: &str,
        exclude: &[String],
    ) -> Result<Vec<PathBuf>, EngineError> {
        let patterns = PatternSet::new(&[pattern.to_string()], exclude)?;
        let root = normalize_path(cwd);

        Ok(self
            .files_under(&root)
            .into_iter()
            .filter(|path| match path.strip_prefix(&root) {
                Ok(relative) => !patterns.is_excluded(relative) && patterns.is_match(relative),
                Err(_) => false,
            })
            .collect())
    }
}
