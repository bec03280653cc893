//! Treesum: Parallel File-Tree Hashing
//!
//! Hashes every regular file below a root directory under a configurable
//! digest algorithm and binds the per-file digests into a Merkle tree,
//! yielding a single deterministic root digest for the directory's content.

pub mod digest;
pub mod error;
pub mod logging;
pub mod pool;
pub mod tree;
