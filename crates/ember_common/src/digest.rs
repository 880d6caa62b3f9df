//! Hex content digests for change detection and download verification.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Read buffer size used when hashing files.
const CHUNK_SIZE: usize = 64 * 1024;

/// Errors produced while computing a digest.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// The input file could not be opened or read.
    #[error("failed to hash {path}: {source}")]
    Io {
        /// The file being hashed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// A supported digest algorithm.
///
/// Parses and displays as `sha256`, `sha1` or `md5` (case-insensitive on input).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256, 64 hex characters.
    Sha256,
    /// SHA-1, 40 hex characters.
    Sha1,
    /// MD5, 32 hex characters.
    Md5,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Md5 => "md5",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown digest algorithm '{0}' (expected sha256, sha1 or md5)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for DigestAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha1" | "sha-1" => Ok(DigestAlgorithm::Sha1),
            "md5" => Ok(DigestAlgorithm::Md5),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Incremental hasher over any of the supported algorithms.
enum Hasher {
    Sha256(Sha256),
    Sha1(Sha1),
    Md5(md5::Context),
}

impl Hasher {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
            DigestAlgorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            DigestAlgorithm::Md5 => Hasher::Md5(md5::Context::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha1(h) => h.update(data),
            Hasher::Md5(h) => h.consume(data),
        }
    }

    fn finish_hex(self) -> String {
        match self {
            Hasher::Sha256(h) => hex::encode(h.finalize()),
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Md5(h) => format!("{:x}", h.compute()),
        }
    }
}

/// Computes the lowercase hex digest of `data`.
pub fn hex_digest(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finish_hex()
}

/// Computes the lowercase hex digest of a file, reading it in chunks.
pub fn file_digest(algorithm: DigestAlgorithm, path: &Path) -> Result<String, DigestError> {
    let io_err = |source: std::io::Error| DigestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut hasher = Hasher::new(algorithm);
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finish_hex())
}

/// Computes the git blob id of `data`, as `git hash-object` would.
///
/// The digest is SHA-1 over the header `blob <len>\0` followed by the bytes,
/// which is the hash remote repositories report for file contents.
pub fn git_blob_sha1(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", data.len()).as_bytes());
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Computes the git blob id of a file on disk.
pub fn file_git_blob_sha1(path: &Path) -> Result<String, DigestError> {
    let content = std::fs::read(path).map_err(|e| DigestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(git_blob_sha1(&content))
}
