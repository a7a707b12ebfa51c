//! Entry Cache
//!
//! Memoized classification results keyed by `PathKey`. Classification goes
//! through `get_or_insert`, which never replaces an existing entry; listing,
//! discovery and staging use `upsert`, which does.

use crate::tree::node::{Entry, EntryKind};
use crate::types::PathKey;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct EntryCache {
    entries: HashMap<PathKey, Entry>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PathKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Insert `entry` unless `key` is already classified; return the cached entry.
    pub fn get_or_insert(&mut self, key: PathKey, entry: Entry) -> Entry {
        self.entries.entry(key).or_insert(entry).clone()
    }

    /// Record `entry` under `key`, replacing any previous classification.
    pub fn upsert(&mut self, key: PathKey, entry: Entry) {
        self.entries.insert(key, entry);
    }

    pub fn contains(&self, key: &PathKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn kind_of(&self, key: &PathKey) -> Option<EntryKind> {
        self.entries.get(key).map(Entry::kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
