//! The persisted cache index.
//!
//! The document is stored as `cache.json` in the cache root folder:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "files": [ { "name": "bin/firmware.elf", "sha": "ce0136..." } ]
//! }
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Name of the cache document within the root folder.
pub const DOCUMENT_FILE: &str = "cache.json";

/// Temporary sibling written during [`CacheDocument::save`].
pub const DOCUMENT_TEMP_FILE: &str = "cache.json.tmp";

/// Schema version written into new documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// A single tracked file: its logical name and last recorded content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Logical name, usually a path relative to the cache root.
    pub name: String,

    /// Hex content hash. The algorithm is chosen by the caller.
    pub sha: String,
}

/// The whole cache index as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    /// Schema version tag. Not interpreted on load.
    pub version: String,

    /// Tracked entries. Names are unique after any [`CacheDocument::upsert`].
    #[serde(rename = "files")]
    pub entries: Vec<CacheEntry>,
}

impl Default for CacheDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheDocument {
    /// Creates an empty document at the current schema version.
    pub fn new() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            entries: Vec::new(),
        }
    }

    /// Returns the document path for a cache root folder.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(DOCUMENT_FILE)
    }

    /// Loads the document from the cache root.
    ///
    /// Returns `Ok(None)` if no document exists. A document that exists but
    /// does not parse is reported as [`CacheError::Corrupt`].
    pub fn load(root: &Path) -> Result<Option<Self>, CacheError> {
        let path = Self::path_in(root);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io { path, source: e }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| CacheError::Corrupt {
                path,
                reason: e.to_string(),
            })
    }

    /// Saves the document to the cache root, replacing any previous one.
    ///
    /// Creates the root folder if needed. The JSON is written to a sibling
    /// temporary file and renamed into place, so the previous document stays
    /// intact if the write fails.
    pub fn save(&self, root: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(root).map_err(|e| CacheError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        let path = Self::path_in(root);
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

        let tmp = root.join(DOCUMENT_TEMP_FILE);
        std::fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            CacheError::Io { path, source: e }
        })
    }

    /// Returns the entry with the given name, if any.
    pub fn find(&self, name: &str) -> Option<&CacheEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Inserts an entry or overwrites the hash of an existing one.
    pub fn upsert(&mut self, name: &str, sha: &str) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.sha = sha.to_string(),
            None => self.entries.push(CacheEntry {
                name: name.to_string(),
                sha: sha.to_string(),
            }),
        }
    }

    /// Removes the entry with the given name. Returns `true` if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }
}

/// Checks that `name` resolves to a file strictly inside the cache root.
///
/// Rejects empty names, absolute paths, `..` components, and the cache's own
/// document files.
pub fn validate_name(name: &str) -> Result<(), CacheError> {
    let path = Path::new(name);
    let mut normal = path.components().filter(|c| !matches!(c, Component::CurDir));
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let reserved = match (normal.next(), normal.next()) {
        (Some(Component::Normal(first)), None) => {
            first == DOCUMENT_FILE || first == DOCUMENT_TEMP_FILE
        }
        (None, _) => true,
        _ => false,
    };
    if name.is_empty() || escapes || reserved {
        return Err(CacheError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
