//! Configuration types deserialized from `ember.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ember_common::DigestAlgorithm;
use ember_net::MirrorTable;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Default cache folder, relative to the project directory.
pub const DEFAULT_CACHE_ROOT: &str = ".ember/cache";

/// The top-level configuration parsed from `ember.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct EmberConfig {
    /// Download cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Mirror hosts keyed by canonical host.
    #[serde(default)]
    pub mirrors: BTreeMap<String, MirrorList>,
}

impl EmberConfig {
    /// Builds the mirror table used to rewrite download URLs.
    pub fn mirror_table(&self) -> MirrorTable {
        let mut table = MirrorTable::new();
        for (host, mirrors) in &self.mirrors {
            table.insert(host, mirrors.0.iter().cloned());
        }
        table
    }

    /// Resolves the cache folder against the project directory.
    ///
    /// Absolute roots are returned unchanged.
    pub fn cache_root(&self, project_dir: &Path) -> PathBuf {
        let root = Path::new(&self.cache.root);
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            project_dir.join(root)
        }
    }
}

/// The `[cache]` section.
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    /// Folder holding cached files and `cache.json`.
    #[serde(default = "default_cache_root")]
    pub root: String,
    /// Digest used when hashing files without an explicit algorithm.
    #[serde(default = "default_algorithm")]
    pub algorithm: DigestAlgorithm,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_cache_root(),
            algorithm: default_algorithm(),
        }
    }
}

fn default_cache_root() -> String {
    DEFAULT_CACHE_ROOT.to_string()
}

fn default_algorithm() -> DigestAlgorithm {
    DigestAlgorithm::Sha1
}

/// Mirror hosts for one canonical host.
///
/// Accepts either a single string (`"github.com" = "gh.example"`) or a list
/// of strings (`"github.com" = ["a.example", "b.example"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorList(pub Vec<String>);

impl<'de> Deserialize<'de> for MirrorList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_string_or_vec(deserializer).map(MirrorList)
    }
}

/// Deserializes a value that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
