//! Digest algorithm selection and accumulator construction.
//!
//! The algorithm set is a closed enumeration: five variants, each with a
//! stable string name and a fixed digest width. Accumulators are single-use;
//! `finalize` consumes the accumulator so a finalized state cannot be
//! written to again.

use crate::error::HashError;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Crc32,
}

impl Algorithm {
    /// All supported algorithms, in a fixed order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Crc32,
    ];

    /// Stable string name, used in diagnostics and on the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Crc32 => "crc32",
        }
    }

    /// Digest width in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
            Algorithm::Crc32 => 4,
        }
    }

    /// Resolve an algorithm from its string name.
    ///
    /// This is the only place an unknown algorithm tag can enter the system;
    /// past this boundary the closed enum makes an invalid tag
    /// unrepresentable.
    pub fn from_name(name: &str) -> Result<Self, HashError> {
        match name {
            "md5" => Ok(Algorithm::Md5),
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            "crc32" => Ok(Algorithm::Crc32),
            other => Err(HashError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_name(s)
    }
}

/// Incremental digest accumulator.
///
/// One accumulator per hashed input: files and internal tree nodes each get
/// a fresh one, so no state is ever shared between concurrent hashes.
pub enum Accumulator {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Crc32(crc32fast::Hasher),
}

impl Accumulator {
    /// Create a freshly-initialized accumulator for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Accumulator::Md5(Md5::new()),
            Algorithm::Sha1 => Accumulator::Sha1(Sha1::new()),
            Algorithm::Sha256 => Accumulator::Sha256(Sha256::new()),
            Algorithm::Sha512 => Accumulator::Sha512(Sha512::new()),
            Algorithm::Crc32 => Accumulator::Crc32(crc32fast::Hasher::new()),
        }
    }

    /// Ingest a chunk of input bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        match self {
            Accumulator::Md5(h) => h.update(bytes),
            Accumulator::Sha1(h) => h.update(bytes),
            Accumulator::Sha256(h) => h.update(bytes),
            Accumulator::Sha512(h) => h.update(bytes),
            Accumulator::Crc32(h) => h.update(bytes),
        }
    }

    /// Finalize and return the digest bytes.
    ///
    /// Consumes the accumulator; CRC32 values are emitted big-endian.
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Accumulator::Md5(h) => h.finalize().to_vec(),
            Accumulator::Sha1(h) => h.finalize().to_vec(),
            Accumulator::Sha256(h) => h.finalize().to_vec(),
            Accumulator::Sha512(h) => h.finalize().to_vec(),
            Accumulator::Crc32(h) => h.finalize().to_be_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accumulator::Md5(_) => "md5",
            Accumulator::Sha1(_) => "sha1",
            Accumulator::Sha256(_) => "sha256",
            Accumulator::Sha512(_) => "sha512",
            Accumulator::Crc32(_) => "crc32",
        };
        f.debug_tuple("Accumulator").field(&name).finish()
    }
}
