//! Pool error recovery tests
//!
//! Per-file failures must not abandon the batch: the pool returns every
//! surviving entry together with one aggregated error, and the resulting
//! tree equals the tree that would exist had the failing file been absent.

use std::fs;
use tempfile::TempDir;
use treesum::digest::Algorithm;
use treesum::error::HashError;
use treesum::pool::Pool;
use treesum::tree::builder::{build_tree, hash_directory};
use treesum::tree::walker;

/// Test that a file vanishing between walk and hash is aggregated, not fatal
#[test]
fn test_vanished_file_yields_partial_result() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();
    fs::write(root.join("c.txt"), "gamma").unwrap();

    let paths = walker::list_files(root, &[]).unwrap();
    assert_eq!(paths.len(), 3);

    // The file disappears after enumeration but before hashing.
    fs::remove_file(root.join("c.txt")).unwrap();

    let report = Pool::new(Algorithm::Sha256).run(paths);

    assert_eq!(report.entries.len(), 2);
    match report.failure {
        Some(HashError::Aggregated { count, ref detail }) => {
            assert_eq!(count, 1);
            assert!(detail.contains("c.txt"));
        }
        ref other => panic!("expected Aggregated, got {:?}", other),
    }
}

/// Test that the surviving tree equals the tree without the failing file
#[test]
fn test_partial_tree_equals_tree_without_failed_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();
    fs::write(root.join("c.txt"), "gamma").unwrap();

    let paths = walker::list_files(root, &[]).unwrap();
    fs::remove_file(root.join("c.txt")).unwrap();

    let report = Pool::new(Algorithm::Sha256).run(paths);
    let partial_root = build_tree(&report.entries, Algorithm::Sha256).unwrap();

    // c.txt no longer exists, so a fresh full hash covers only a and b.
    let reference = hash_directory(root, Algorithm::Sha256, &[]).unwrap();

    assert_eq!(partial_root.digest, reference.root.digest);
    assert!(reference.failure.is_none());
}

/// Test that a batch where every file fails produces no entries
#[test]
fn test_total_failure_has_empty_entries() {
    let temp_dir = TempDir::new().unwrap();
    let missing1 = temp_dir.path().join("gone1");
    let missing2 = temp_dir.path().join("gone2");

    let report = Pool::new(Algorithm::Sha256).run(vec![missing1, missing2]);

    assert!(report.entries.is_empty());
    match report.failure {
        Some(HashError::Aggregated { count, .. }) => assert_eq!(count, 2),
        ref other => panic!("expected Aggregated, got {:?}", other),
    }
}
