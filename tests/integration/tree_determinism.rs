//! Determinism tests
//!
//! The root digest must be bit-identical across runs, across worker counts,
//! and insensitive to excluded files; it must change when any included byte
//! changes.

use std::fs;
use tempfile::TempDir;
use treesum::digest::Algorithm;
use treesum::tree::builder::{hash_directory, TreeBuilder};

fn build_fixture(root: &std::path::Path, files: usize) {
    for i in 0..files {
        let dir = root.join(format!("dir{}", i % 7));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("file{:04}.dat", i)), format!("payload {}", i)).unwrap();
    }
}

/// Test that two independent invocations return the same hex root
#[test]
fn test_repeat_invocations_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root, 40);

    for algorithm in Algorithm::ALL {
        let first = hash_directory(root, algorithm, &[]).unwrap();
        let second = hash_directory(root, algorithm, &[]).unwrap();
        assert_eq!(first.root_hex, second.root_hex, "{}", algorithm);
    }
}

/// Test that flipping a single byte of an included file changes the root
#[test]
fn test_byte_flip_changes_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root, 10);

    let before = hash_directory(root, Algorithm::Sha256, &[]).unwrap();

    let target = root.join("dir0").join("file0000.dat");
    let mut content = fs::read(&target).unwrap();
    content[0] ^= 0x01;
    fs::write(&target, content).unwrap();

    let after = hash_directory(root, Algorithm::Sha256, &[]).unwrap();

    assert_ne!(before.root_hex, after.root_hex);
}

/// Test that adding or removing an excluded file leaves the root unchanged
#[test]
fn test_excluded_file_does_not_affect_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root, 10);

    let excludes = vec!["scratch".to_string()];
    let before = hash_directory(root, Algorithm::Sha256, &excludes).unwrap();

    fs::create_dir_all(root.join("scratch")).unwrap();
    fs::write(root.join("scratch").join("tmp.bin"), "noise").unwrap();

    let with_file = hash_directory(root, Algorithm::Sha256, &excludes).unwrap();
    assert_eq!(before.root_hex, with_file.root_hex);

    fs::remove_dir_all(root.join("scratch")).unwrap();

    let removed = hash_directory(root, Algorithm::Sha256, &excludes).unwrap();
    assert_eq!(before.root_hex, removed.root_hex);
}

/// Test that worker count does not affect the root on a larger tree
#[test]
fn test_worker_counts_yield_identical_roots() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root, 500);

    let default_workers = hash_directory(root, Algorithm::Sha256, &[]).unwrap();

    for workers in [1usize, 2, 16] {
        let result = TreeBuilder::new(root.to_path_buf(), Algorithm::Sha256)
            .with_workers(workers)
            .build()
            .unwrap();
        assert_eq!(result.root_hex, default_workers.root_hex, "workers={}", workers);
    }
}

/// Test that the per-file manifest is identical across runs
#[test]
fn test_manifest_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root, 25);

    let first = hash_directory(root, Algorithm::Sha1, &[]).unwrap();
    let second = hash_directory(root, Algorithm::Sha1, &[]).unwrap();

    assert_eq!(first.entries, second.entries);
}
