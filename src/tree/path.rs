//! Path normalization and the path utilities exposed to handlers.
//!
//! Normalization is purely lexical: the filesystem is never consulted, so paths
//! that do not exist yet (staged writes) normalize the same way as real ones.

use crate::error::EngineError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Lexically normalize a path
///
/// Drops `.` components, resolves `..` against preceding normal components,
/// collapses repeated separators and strips trailing separators. `..` above the
/// root of an absolute path is discarded; on a relative path it is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Normalized, NFC-composed string form of a path, used as hash input.
pub fn normalized_string(path: &Path) -> String {
    normalize_path(path)
        .to_string_lossy()
        .nfc()
        .collect::<String>()
}

/// Parent directory of a path; `.` for a bare file name.
pub fn dirname(path: &Path) -> Result<PathBuf, EngineError> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(EngineError::InvalidPath(format!(
            "{} has no parent directory",
            path.display()
        ))),
    }
}

/// Final component of a path.
pub fn basename(path: &Path) -> Result<String, EngineError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| EngineError::InvalidPath(format!("{} has no file name", path.display())))
}

/// Join `segment` onto `base` and normalize the result.
///
/// A leading root on `segment` is ignored, so joining never discards `base`.
pub fn join(base: &Path, segment: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in segment.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            other => joined.push(other.as_os_str()),
        }
    }
    normalize_path(&joined)
}
