//! Hash computation for paths

use crate::tree::path::normalized_string;
use crate::types::PathKey;
use std::path::Path;

/// Deterministic, total mapping from a path to its `PathKey`
pub trait PathHasher: Send + Sync {
    fn hash(&self, path: &Path) -> PathKey;
}

/// BLAKE3 digest of the normalized path string
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3PathHasher;

impl PathHasher for Blake3PathHasher {
    fn hash(&self, path: &Path) -> PathKey {
        let normalized = normalized_string(path);
        PathKey::from_bytes(*blake3::hash(normalized.as_bytes()).as_bytes())
    }
}
