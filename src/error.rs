//! Error types for the parallel tree hasher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while hashing files and building Merkle trees.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build a Merkle tree from zero entries")]
    EmptyInput,

    #[error("{count} file(s) failed to hash: {detail}")]
    Aggregated { count: usize, detail: String },
}

impl HashError {
    /// Wrap an I/O failure with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HashError::Io {
            path: path.into(),
            source,
        }
    }

    /// Fold per-file failures into a single aggregated error.
    ///
    /// Used by the dispatch pool: individual file errors are non-fatal, so
    /// they are collected and surfaced together with the surviving results.
    pub fn aggregate(failures: &[(PathBuf, HashError)]) -> Self {
        let detail = failures
            .iter()
            .map(|(path, err)| format!("{}: {}", path.display(), err))
            .collect::<Vec<_>>()
            .join("; ");
        HashError::Aggregated {
            count: failures.len(),
            detail,
        }
    }
}
