//! Error types for network helpers.

use std::path::PathBuf;

use ember_cache::CacheError;

/// Errors produced by mirror rewriting and downloads.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// The input could not be parsed as a URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// A configured mirror is not a usable host name.
    #[error("invalid mirror '{mirror}' for host '{host}'")]
    InvalidMirror {
        /// The canonical host being rewritten.
        host: String,
        /// The rejected mirror host.
        mirror: String,
    },

    /// A cache name would resolve outside the cache root.
    #[error("invalid cache name '{0}'")]
    InvalidName(String),

    /// The operation was cancelled before it produced a result.
    #[error("download cancelled")]
    Cancelled,

    /// The transport reported a failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The downloaded content does not hash to the expected value.
    #[error("hash mismatch for {name}: expected {expected}, got {actual}")]
    ShaMismatch {
        /// Logical name of the requested file.
        name: String,
        /// The hash the caller asked for.
        expected: String,
        /// The hash of the received bytes.
        actual: String,
    },

    /// Writing the downloaded file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache index could not be saved.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
