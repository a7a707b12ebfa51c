//! Change Stage
//!
//! Uncommitted writes and deletions, one outcome per path key. Re-staging a key
//! replaces its outcome but keeps the key's original position, so draining
//! reports paths in the order they were first touched.

use crate::types::PathKey;
use indexmap::IndexMap;

/// Staged outcome for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Upsert(String),
    Delete,
}

#[derive(Debug, Default)]
pub struct ChangeStage {
    changes: IndexMap<PathKey, Change>,
}

impl ChangeStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PathKey) -> Option<&Change> {
        self.changes.get(key)
    }

    pub fn upsert(&mut self, key: PathKey, data: String) {
        self.changes.insert(key, Change::Upsert(data));
    }

    pub fn delete(&mut self, key: PathKey) {
        self.changes.insert(key, Change::Delete);
    }

    /// Staged outcomes in first-touched order
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &Change)> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
