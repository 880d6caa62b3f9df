//! Content-addressed cache of downloaded files.
//!
//! This crate tracks which files under a root folder are known to match a
//! given content hash, so callers can skip redundant downloads. The index is
//! a single `cache.json` document that is loaded once and written back only
//! on an explicit [`FileCache::save`].

#![warn(missing_docs)]

pub mod cache;
pub mod document;
pub mod error;

pub use cache::FileCache;
pub use document::{
    validate_name, CacheDocument, CacheEntry, DOCUMENT_FILE, DOCUMENT_TEMP_FILE, DOCUMENT_VERSION,
};
pub use error::CacheError;
