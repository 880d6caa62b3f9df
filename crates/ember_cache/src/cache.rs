//! High-level cache handle.
//!
//! [`FileCache`] owns the in-memory [`CacheDocument`] for one root folder.
//! Mutations are batched in memory; nothing touches disk until
//! [`FileCache::save`] is called.

use std::path::{Path, PathBuf};

use crate::document::{validate_name, CacheDocument, CacheEntry};
use crate::error::CacheError;

/// Index of files under a root folder keyed by (name, content hash).
///
/// A lookup hits only when both the logical name and the hash match a
/// recorded entry and the backing file `<root>/<name>` exists. Entries whose
/// backing file disappeared are left in place until cleared.
#[derive(Debug)]
pub struct FileCache {
    /// Root folder holding the cached files and `cache.json`.
    root: PathBuf,

    /// The in-memory index.
    document: CacheDocument,
}

impl FileCache {
    /// Opens the cache rooted at `root`.
    ///
    /// Loads `<root>/cache.json` if present, otherwise starts with an empty
    /// index. A document that cannot be parsed is returned as
    /// [`CacheError::Corrupt`] so the caller can decide whether to recreate it.
    pub fn open(root: &Path) -> Result<Self, CacheError> {
        let document = match CacheDocument::load(root)? {
            Some(document) => {
                tracing::debug!(
                    root = %root.display(),
                    entries = document.entries.len(),
                    "loaded cache document"
                );
                document
            }
            None => {
                tracing::debug!(root = %root.display(), "no cache document, starting empty");
                CacheDocument::new()
            }
        };
        Ok(Self {
            root: root.to_path_buf(),
            document,
        })
    }

    /// Creates an empty cache for `root`, ignoring any existing document.
    ///
    /// The document on disk is only replaced when [`FileCache::save`] runs.
    pub fn recreate(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            document: CacheDocument::new(),
        }
    }

    /// Opens the cache, replacing a corrupt document with an empty one.
    ///
    /// I/O errors are still returned.
    pub fn open_or_recreate(root: &Path) -> Result<Self, CacheError> {
        match Self::open(root) {
            Err(err @ CacheError::Corrupt { .. }) => {
                tracing::warn!(%err, "discarding corrupt cache document");
                Ok(Self::recreate(root))
            }
            other => other,
        }
    }

    /// Records `sha` as the current hash of `name`, replacing any previous hash.
    ///
    /// Names that would resolve outside the root, or onto the cache document
    /// itself, are rejected with [`CacheError::InvalidName`].
    pub fn add(&mut self, name: &str, sha: &str) -> Result<(), CacheError> {
        validate_name(name)?;
        tracing::debug!(name, sha, "cache add");
        self.document.upsert(name, sha);
        Ok(())
    }

    /// Looks up a file by name and hash.
    ///
    /// Returns the backing file path when an entry matches both `name` and
    /// `sha` exactly and the file exists. A missing backing file is a miss;
    /// the entry is kept. Invalid names always miss.
    pub fn get(&self, name: &str, sha: &str) -> Option<PathBuf> {
        if validate_name(name).is_err() {
            tracing::debug!(name, "cache lookup with invalid name");
            return None;
        }
        let hit = self
            .document
            .entries
            .iter()
            .any(|e| e.name == name && e.sha == sha);
        if !hit {
            tracing::debug!(name, sha, "cache miss");
            return None;
        }

        let path = self.root.join(name);
        if path.is_file() {
            tracing::debug!(name, sha, "cache hit");
            Some(path)
        } else {
            tracing::debug!(name, sha, path = %path.display(), "cache entry without backing file");
            None
        }
    }

    /// Removes the entry for `name`, or every entry when `name` is `None`.
    pub fn clear(&mut self, name: Option<&str>) {
        match name {
            Some(name) => {
                let removed = self.document.remove(name);
                tracing::debug!(name, removed, "cache clear");
            }
            None => {
                tracing::debug!(entries = self.document.entries.len(), "cache clear all");
                self.document.entries.clear();
            }
        }
    }

    /// Writes the in-memory index to `<root>/cache.json`.
    pub fn save(&self) -> Result<(), CacheError> {
        self.document.save(&self.root)?;
        tracing::debug!(
            path = %self.document_path().display(),
            entries = self.document.entries.len(),
            "saved cache document"
        );
        Ok(())
    }

    /// Returns the recorded hash for `name`, regardless of the backing file.
    pub fn contains(&self, name: &str) -> Option<&str> {
        self.document.find(name).map(|e| e.sha.as_str())
    }

    /// Returns all recorded entries.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.document.entries
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.document.entries.len()
    }

    /// Returns `true` if no entries are recorded.
    pub fn is_empty(&self) -> bool {
        self.document.entries.is_empty()
    }

    /// Returns the root folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the cache document.
    pub fn document_path(&self) -> PathBuf {
        CacheDocument::path_in(&self.root)
    }
}
