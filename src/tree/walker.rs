//! Filesystem walker with exclusion filtering.
//!
//! Enumerates the regular files below a root directory, skipping every path
//! that contains one of the configured exclusion substrings. Symbolic links
//! are not followed. The returned list is sorted on the canonical path key
//! so the output is reproducible regardless of directory-read order.

use crate::error::HashError;
use crate::tree::path;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filesystem walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false).
    pub follow_symlinks: bool,
    /// Plain substrings matched against the normalized full path; a file
    /// whose path contains any of them is skipped. An empty set admits
    /// every file.
    pub excludes: Vec<String>,
    /// Maximum depth to traverse (None = unlimited).
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            excludes: Vec::new(),
            max_depth: None,
        }
    }
}

/// Filesystem walker.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration.
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect every included regular file.
    ///
    /// Any traversal error fails the whole walk; partial lists are never
    /// returned. The result is sorted by the canonical path key.
    pub fn list_files(&self) -> Result<Vec<PathBuf>, HashError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let at = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                let source = e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "walk failed")
                });
                HashError::io(at, source)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let entry_path = entry.path();
            if self.is_excluded(entry_path) {
                continue;
            }

            files.push(entry_path.to_path_buf());
        }

        // Fixed output order: byte-wise on the normalized path string.
        files.sort_by(|a, b| path::sort_key(a).cmp(&path::sort_key(b)));

        debug!(
            root = %self.root.display(),
            file_count = files.len(),
            "Walked filesystem"
        );

        Ok(files)
    }

    /// Plain substring match against the normalized full path.
    fn is_excluded(&self, entry_path: &Path) -> bool {
        if self.config.excludes.is_empty() {
            return false;
        }
        let normalized = path::normalized_string(entry_path);
        self.config
            .excludes
            .iter()
            .any(|pattern| normalized.contains(pattern.as_str()))
    }
}

/// List the included regular files below `root`.
pub fn list_files(root: &Path, excludes: &[String]) -> Result<Vec<PathBuf>, HashError> {
    let config = WalkerConfig {
        excludes: excludes.to_vec(),
        ..WalkerConfig::default()
    };
    Walker::with_config(root.to_path_buf(), config).list_files()
}
