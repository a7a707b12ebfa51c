//! Host filesystem access through `tokio::fs`.

use super::{DirEntry, FileStat, FileSystem};
use async_trait::async_trait;
use std::io;
use std::path::Path;

/// The real filesystem
///
/// Directory listings are sorted by name so that runs over the same tree visit
/// siblings in the same order on every platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl HostFileSystem {
    pub fn new() -> Self {
        HostFileSystem
    }
}

#[async_trait]
impl FileSystem for HostFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            is_file: metadata.is_file(),
            is_directory: metadata.is_dir(),
        })
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            // file_type does not follow symlinks; links are neither files nor directories here
            let file_type = entry.file_type().await?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_file: file_type.is_file(),
                is_directory: file_type.is_dir(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
