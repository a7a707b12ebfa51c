//! Path Model
//!
//! Path normalization, hashing into `PathKey`s, and the classified entries the
//! overlay filesystem caches per key.

pub mod hasher;
pub mod node;
pub mod path;
