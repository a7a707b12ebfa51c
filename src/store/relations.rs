//! Relation Index
//!
//! Many-to-many mapping from a directory key to every child key ever observed
//! under it.
//!
//! The index only grows. A child that disappears from a later real listing stays
//! related to its parent for the rest of the run, so repeated listings of the same
//! directory enumerate a stable superset. Callers that need the live listing must
//! go to the filesystem collaborator directly.

use crate::types::PathKey;
use indexmap::{IndexMap, IndexSet};

/// Insertion-ordered parent → children relation
#[derive(Debug, Default)]
pub struct RelationIndex {
    /// parent key → child keys, in first-seen order
    children: IndexMap<PathKey, IndexSet<PathKey>>,
}

impl RelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relate `child` to `parent`
    ///
    /// Idempotent; returns `true` when the pair was not related before.
    pub fn upsert(&mut self, parent: PathKey, child: PathKey) -> bool {
        self.children.entry(parent).or_default().insert(child)
    }

    /// Every child ever related to `parent`, in insertion order
    pub fn children_of(&self, parent: &PathKey) -> Vec<PathKey> {
        self.children
            .get(parent)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of parents with at least one child
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
