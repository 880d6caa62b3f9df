//! Shared foundational helpers used across the Ember workspace.
//!
//! This crate provides content digests (SHA-256, SHA-1, MD5 and git blob
//! hashes) and lenient dotted version strings with numeric ordering.

#![warn(missing_docs)]

pub mod digest;
pub mod version;

pub use digest::{
    file_digest, file_git_blob_sha1, git_blob_sha1, hex_digest, DigestAlgorithm, DigestError,
    ParseAlgorithmError,
};
pub use version::{compare_versions, ParseVersionError, Version};
