//! Streaming file hasher.
//!
//! Feeds a file's bytes through a fresh accumulator in bounded-size reads,
//! so per-file memory use stays flat no matter how large the file is.

use crate::digest::{Accumulator, Algorithm};
use crate::error::HashError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Read buffer size; the per-file memory ceiling.
const READ_BUF_LEN: usize = 64 * 1024;

/// Hash the entire contents of the file at `path`.
///
/// Opens the file, streams it through a fresh accumulator, and returns the
/// finalized digest bytes. The descriptor is released on every exit path
/// when the `File` drops.
pub fn hash_file(file_path: &Path, algorithm: Algorithm) -> Result<Vec<u8>, HashError> {
    let mut file = File::open(file_path).map_err(|e| HashError::io(file_path, e))?;

    let mut acc = Accumulator::new(algorithm);
    let mut buf = vec![0u8; READ_BUF_LEN];

    loop {
        let n = file.read(&mut buf).map_err(|e| HashError::io(file_path, e))?;
        if n == 0 {
            break;
        }
        acc.update(&buf[..n]);
    }

    let digest = acc.finalize();
    trace!(path = %file_path.display(), digest = %hex::encode(&digest), "Hashed file");
    Ok(digest)
}
