//! Filesystem Merkle tree.
//!
//! Walks a directory tree, hashes every included regular file, and folds the
//! per-file digests pairwise into a single deterministic root digest.

pub mod builder;
pub mod hasher;
pub mod node;
pub mod path;
pub mod walker;
