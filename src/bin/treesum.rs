//! Treesum CLI Binary
//!
//! Thin command-line wrapper around the library: hash a directory tree and
//! print the Merkle root, optionally with the per-file manifest as JSON.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use treesum::digest::Algorithm;
use treesum::logging;
use treesum::tree::builder::{DirectoryHash, TreeBuilder};

/// Treesum - parallel file-tree hashing and Merkle root computation
#[derive(Parser)]
#[command(name = "treesum")]
#[command(about = "Parallel file-tree hashing and Merkle root computation")]
struct Cli {
    /// Root directory to hash
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Digest algorithm (md5, sha1, sha256, sha512, crc32)
    #[arg(long, default_value = "sha256")]
    algorithm: String,

    /// Skip any file whose path contains this substring (repeatable)
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Worker thread count (defaults to the logical CPU count)
    #[arg(long)]
    workers: Option<usize>,

    /// Emit the per-file manifest as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (default: warnings only)
    #[arg(long)]
    verbose: bool,
}

#[derive(Serialize)]
struct ManifestFile {
    path: String,
    digest: String,
}

#[derive(Serialize)]
struct Manifest {
    algorithm: &'static str,
    root: String,
    files: Vec<ManifestFile>,
}

fn main() {
    let cli = Cli::parse();

    logging::init(if cli.verbose { "debug" } else { "warn" });

    match run(&cli) {
        Ok(()) => {}
        Err(e) => {
            error!("Directory hash failed: {:#}", e);
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let algorithm = Algorithm::from_name(&cli.algorithm)
        .with_context(|| format!("invalid --algorithm {:?}", cli.algorithm))?;

    let mut builder =
        TreeBuilder::new(cli.root.clone(), algorithm).with_excludes(cli.excludes.clone());
    if let Some(workers) = cli.workers {
        builder = builder.with_workers(workers);
    }

    let result = builder
        .build()
        .with_context(|| format!("failed to hash {}", cli.root.display()))?;

    info!(root = %result.root_hex, files = result.entries.len(), "Hash complete");

    if cli.json {
        println!("{}", render_manifest(algorithm, &result)?);
    } else {
        println!("{}", result.root_hex);
    }

    if let Some(failure) = &result.failure {
        eprintln!("warning: {}", failure);
    }

    Ok(())
}

fn render_manifest(algorithm: Algorithm, result: &DirectoryHash) -> anyhow::Result<String> {
    let manifest = Manifest {
        algorithm: algorithm.name(),
        root: result.root_hex.clone(),
        files: result
            .entries
            .iter()
            .map(|entry| ManifestFile {
                path: entry.path.display().to_string(),
                digest: entry.digest_hex(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")
}
