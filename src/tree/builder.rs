//! Merkle aggregation and the top-level directory hashing driver.
//!
//! The aggregator consumes the unordered entry set produced by the pool,
//! sorts it on the canonical path key, and folds it pairwise up to a single
//! root. When a level has an odd number of nodes greater than one, the last
//! node is duplicated before pairing (Bitcoin-style). A single entry is its
//! own root; its digest is the file digest, no duplication applied.

use crate::digest::{Accumulator, Algorithm};
use crate::error::HashError;
use crate::pool::Pool;
use crate::tree::node::{FileEntry, MerkleNode};
use crate::tree::path;
use crate::tree::walker::{Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Build a Merkle tree over the given entries.
///
/// Entries are re-sorted internally, so the caller may pass them in any
/// order; the root digest depends only on the entry set. Fails with
/// `EmptyInput` on zero entries.
pub fn build_tree(entries: &[FileEntry], algorithm: Algorithm) -> Result<MerkleNode, HashError> {
    if entries.is_empty() {
        return Err(HashError::EmptyInput);
    }

    // Canonical leaf order: byte-wise on the normalized path string.
    let mut sorted: Vec<&FileEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| path::sort_key(&a.path).cmp(&path::sort_key(&b.path)));

    let mut level: Vec<MerkleNode> = sorted
        .into_iter()
        .map(|entry| MerkleNode::leaf(entry.digest.clone()))
        .collect();

    let mut levels = 0usize;
    while level.len() > 1 {
        // Odd level: duplicate the last node so pairing is total.
        if level.len() % 2 == 1 {
            if let Some(last) = level.last().cloned() {
                level.push(last);
            }
        }

        let mut next = Vec::with_capacity(level.len() / 2);
        let mut nodes = level.into_iter();
        while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
            // Fresh accumulator per pair; digest = H(left || right).
            let mut acc = Accumulator::new(algorithm);
            acc.update(&left.digest);
            acc.update(&right.digest);
            let digest = acc.finalize();
            next.push(MerkleNode::internal(digest, left, right));
        }

        level = next;
        levels += 1;
    }

    debug!(leaf_count = entries.len(), levels, "Folded Merkle tree");

    level.pop().ok_or(HashError::EmptyInput)
}

/// Result of hashing a directory: the Merkle root, its lowercase hex
/// rendering, the per-file manifest (canonically sorted), and the aggregated
/// per-file failure when one occurred.
#[derive(Debug)]
pub struct DirectoryHash {
    pub root: MerkleNode,
    pub root_hex: String,
    pub entries: Vec<FileEntry>,
    pub failure: Option<HashError>,
}

/// Composes walker, pool, and aggregator for a directory tree.
pub struct TreeBuilder {
    root: PathBuf,
    algorithm: Algorithm,
    excludes: Vec<String>,
    workers: Option<usize>,
}

impl TreeBuilder {
    /// Create a builder for the given root directory and algorithm.
    pub fn new(root: PathBuf, algorithm: Algorithm) -> Self {
        Self {
            root,
            algorithm,
            excludes: Vec::new(),
            workers: None,
        }
    }

    /// Set exclusion substrings; a file whose full path contains any of
    /// them is skipped.
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Override the pool's worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Walk, hash, and aggregate.
    ///
    /// Per-file failures are surfaced in `DirectoryHash::failure` alongside a
    /// tree built from the surviving entries; they become fatal only when no
    /// entry survived. A tree with no included files fails with `EmptyInput`.
    #[instrument(skip(self), fields(root = %self.root.display(), algorithm = %self.algorithm))]
    pub fn build(&self) -> Result<DirectoryHash, HashError> {
        let start = Instant::now();
        info!("Starting directory hash");

        let config = WalkerConfig {
            excludes: self.excludes.clone(),
            ..WalkerConfig::default()
        };
        let paths = Walker::with_config(self.root.clone(), config).list_files()?;

        let mut pool = Pool::new(self.algorithm);
        if let Some(workers) = self.workers {
            pool = pool.with_workers(workers);
        }
        let report = pool.run(paths);

        if report.entries.is_empty() {
            // Nothing survived: a per-file failure set is fatal here,
            // otherwise the tree is simply empty.
            return Err(report.failure.unwrap_or(HashError::EmptyInput));
        }

        let tree = build_tree(&report.entries, self.algorithm)?;
        let root_hex = tree.digest_hex();

        let mut entries = report.entries;
        entries.sort_by(|a, b| path::sort_key(&a.path).cmp(&path::sort_key(&b.path)));

        info!(
            file_count = entries.len(),
            root = %root_hex,
            duration_ms = start.elapsed().as_millis(),
            "Directory hash completed"
        );

        Ok(DirectoryHash {
            root: tree,
            root_hex,
            entries,
            failure: report.failure,
        })
    }
}

/// Hash the directory tree rooted at `root`.
pub fn hash_directory(
    root: &Path,
    algorithm: Algorithm,
    excludes: &[String],
) -> Result<DirectoryHash, HashError> {
    TreeBuilder::new(root.to_path_buf(), algorithm)
        .with_excludes(excludes.to_vec())
        .build()
}
