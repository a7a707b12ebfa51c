//! In-memory stores behind the overlay filesystem
//!
//! Every store is keyed by `PathKey` and lives for one engine run.

pub mod changes;
pub mod entries;
pub mod relations;

pub use changes::{Change, ChangeStage};
pub use entries::EntryCache;
pub use relations::RelationIndex;
