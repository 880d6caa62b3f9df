//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while opening or saving a [`FileCache`](crate::FileCache).
///
/// Lookups never fail: a missing backing file is reported as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing the cache document.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache document exists but is not a valid cache document.
    #[error("corrupt cache document {path}: {reason}")]
    Corrupt {
        /// The document path.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A logical name does not resolve to a file inside the cache root.
    #[error("invalid cache name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// The in-memory document could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

impl CacheError {
    /// Returns `true` if this error reports an unreadable cache document.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::Corrupt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/tmp/cache/cache.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("cache.json"));
        assert!(!err.is_corrupt());
    }

    #[test]
    fn corrupt_display() {
        let err = CacheError::Corrupt {
            path: PathBuf::from("cache.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("corrupt cache document"));
        assert!(msg.contains("line 1 column 1"));
        assert!(err.is_corrupt());
    }

    #[test]
    fn invalid_name_display() {
        let err = CacheError::InvalidName {
            name: "../x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid cache name '../x'");
    }

    #[test]
    fn serialization_error_display() {
        let err = CacheError::Serialization {
            reason: "key must be a string".to_string(),
        };
        assert!(err.to_string().contains("key must be a string"));
    }
}
