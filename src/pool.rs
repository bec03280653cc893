//! Parallel dispatch pool for file hashing.
//!
//! Workers pull paths from a shared input queue, hash each file, and push
//! either a `FileEntry` into the result channel or a wrapped error into the
//! error channel. A failed file never terminates a worker; the failure is
//! recorded and the worker moves on. The caller drains results, then errors,
//! after every worker has finished.
//!
//! Both channels are bounded to the path-list length, so workers can always
//! push without blocking and the pool cannot grow unbounded buffers. The
//! returned entry list carries no ordering guarantee; the aggregator imposes
//! the canonical order.

use crate::digest::Algorithm;
use crate::error::HashError;
use crate::tree::hasher;
use crate::tree::node::FileEntry;
use crate::tree::walker;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, instrument, warn};

/// Outcome of a pool run: every entry that hashed successfully, plus an
/// aggregated error when one or more files failed.
///
/// Partial success is distinguishable from total failure: `failure` present
/// with non-empty `entries` means some files were skipped; `failure` present
/// with empty `entries` means nothing survived.
#[derive(Debug)]
pub struct HashReport {
    pub entries: Vec<FileEntry>,
    pub failure: Option<HashError>,
}

/// Worker pool that hashes a batch of files concurrently.
pub struct Pool {
    algorithm: Algorithm,
    workers: usize,
}

impl Pool {
    /// Create a pool sized to the host's logical CPU count.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            workers: default_worker_count(),
        }
    }

    /// Override the worker count (clamped to at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Hash every path in the batch.
    ///
    /// Workers are spawned for this batch only and joined before returning.
    #[instrument(skip(self, paths), fields(files = paths.len(), workers = self.workers, algorithm = %self.algorithm))]
    pub fn run(&self, paths: Vec<PathBuf>) -> HashReport {
        if paths.is_empty() {
            return HashReport {
                entries: Vec::new(),
                failure: None,
            };
        }

        let capacity = paths.len();
        let workers = self.workers.min(capacity);
        let algorithm = self.algorithm;

        let queue = Mutex::new(VecDeque::from(paths));
        let (entry_tx, entry_rx) = mpsc::sync_channel::<FileEntry>(capacity);
        let (error_tx, error_rx) = mpsc::sync_channel::<(PathBuf, HashError)>(capacity);

        thread::scope(|scope| {
            for _ in 0..workers {
                let entry_tx = entry_tx.clone();
                let error_tx = error_tx.clone();
                let queue = &queue;

                scope.spawn(move || {
                    loop {
                        let next = queue.lock().pop_front();
                        let Some(file_path) = next else {
                            break;
                        };
                        match hasher::hash_file(&file_path, algorithm) {
                            Ok(digest) => {
                                // Channel capacity equals the batch size, so
                                // this cannot fail while the receiver lives.
                                let _ = entry_tx.send(FileEntry::new(file_path, digest));
                            }
                            Err(err) => {
                                warn!(path = %file_path.display(), error = %err, "File hash failed");
                                let _ = error_tx.send((file_path, err));
                            }
                        }
                    }
                });
            }
        });

        // All workers have joined; drop the original senders so the drains
        // below terminate.
        drop(entry_tx);
        drop(error_tx);

        let entries: Vec<FileEntry> = entry_rx.into_iter().collect();
        let failures: Vec<(PathBuf, HashError)> = error_rx.into_iter().collect();

        debug!(
            hashed = entries.len(),
            failed = failures.len(),
            "Pool batch completed"
        );

        let failure = if failures.is_empty() {
            None
        } else {
            Some(HashError::aggregate(&failures))
        };

        HashReport { entries, failure }
    }
}

/// Hash every included regular file below `root`.
///
/// Walker failures are fatal; per-file failures are aggregated into
/// `HashReport::failure` alongside the surviving entries.
pub fn hash_all(
    root: &Path,
    algorithm: Algorithm,
    excludes: &[String],
) -> Result<HashReport, HashError> {
    let paths = walker::list_files(root, excludes)?;
    Ok(Pool::new(algorithm).run(paths))
}

fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
