//! Core types for the repomod overlay filesystem and command engine.

use std::collections::BTreeMap;
use std::fmt;

/// PathKey: Deterministic hash of a normalized path string
///
/// Used in place of raw paths as the key of every cache, index and staging map,
/// so equal paths always land in the same slot however they were spelled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey([u8; 32]);

impl PathKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PathKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First seven hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])[..7].to_string()
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathKey({})", self.short())
    }
}

/// Options: String options handed to every handler and carried on commands
pub type Options = BTreeMap<String, String>;

/// Dependencies: Caller-supplied values exposed read-only to handlers
pub type Dependencies = serde_json::Map<String, serde_json::Value>;
