//! Rewriting well-known hosts to mirror hosts.
//!
//! Some artifact hosts are slow or unreachable from parts of the world. A
//! [`MirrorTable`] maps a canonical host to one or more mirrors, and
//! [`MirrorTable::rewrite`] swaps the host of a URL for a randomly chosen
//! mirror. The random source is injected so that tests can fix the choice.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use url::Url;

use crate::error::NetError;

/// Map from canonical host to the mirror hosts that serve the same content.
///
/// Host keys are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorTable {
    hosts: BTreeMap<String, Vec<String>>,
}

impl MirrorTable {
    /// Creates an empty table that leaves every URL unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mirrors` for `host`, replacing any previous list.
    ///
    /// An empty list removes the host from the table.
    pub fn insert<I, S>(&mut self, host: &str, mirrors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = host.to_ascii_lowercase();
        let mirrors: Vec<String> = mirrors.into_iter().map(Into::into).collect();
        if mirrors.is_empty() {
            self.hosts.remove(&key);
        } else {
            self.hosts.insert(key, mirrors);
        }
    }

    /// Returns the mirrors registered for `host`.
    pub fn mirrors_for(&self, host: &str) -> Option<&[String]> {
        self.hosts
            .get(&host.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Returns `true` if no host has mirrors.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns the canonical hosts in sorted order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    /// Returns `url` with its host replaced by one of its mirrors.
    ///
    /// URLs whose host has no mirrors are returned unchanged. Scheme, port,
    /// path, query and fragment are always preserved.
    pub fn rewrite<R: Rng + ?Sized>(&self, url: &Url, rng: &mut R) -> Result<Url, NetError> {
        let Some(host) = url.host_str() else {
            return Ok(url.clone());
        };
        let Some(mirror) = self.mirrors_for(host).and_then(|m| m.choose(rng)) else {
            return Ok(url.clone());
        };

        let mut rewritten = url.clone();
        rewritten
            .set_host(Some(mirror))
            .map_err(|_| NetError::InvalidMirror {
                host: host.to_string(),
                mirror: mirror.clone(),
            })?;
        tracing::debug!(from = %url, to = %rewritten, "rewrote URL to mirror");
        Ok(rewritten)
    }

    /// Parses `url` and rewrites it with [`MirrorTable::rewrite`].
    pub fn rewrite_str<R: Rng + ?Sized>(&self, url: &str, rng: &mut R) -> Result<Url, NetError> {
        let parsed = Url::parse(url).map_err(|e| NetError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.rewrite(&parsed, rng)
    }
}
