//! Cancellable downloads and cache-aware fetching.
//!
//! The host environment provides the actual HTTP client as a [`Transport`].
//! [`download`] races a transport fetch against a [`CancellationToken`] and
//! always yields exactly one outcome. [`Downloader::fetch_cached`] builds on
//! it to reuse files already recorded in a [`FileCache`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ember_cache::{validate_name, FileCache};
use ember_common::git_blob_sha1;
use rand::Rng;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::NetError;
use crate::mirror::MirrorTable;

/// Bytes received so far and the expected total, if the server reported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes received so far.
    pub received: u64,
    /// Total size from the response headers.
    pub total: Option<u64>,
}

/// Callback invoked by a transport as data arrives.
///
/// Callbacks must be `'static`; share state with the caller through an `Arc`.
pub type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// A byte-fetching collaborator supplied by the host.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the full body of `url`, reporting progress along the way.
    async fn fetch(&self, url: &Url, progress: &ProgressFn) -> Result<Vec<u8>, NetError>;
}

/// Fetches `url`, stopping early if `cancel` fires.
///
/// Produces exactly one outcome. A token that is already cancelled wins
/// before the transport is called. If the token is cancelled by the time the
/// fetch settles, even within the same poll, the outcome is
/// [`NetError::Cancelled`] and the fetch result is discarded.
pub async fn download<T: Transport + ?Sized>(
    transport: &T,
    url: &Url,
    cancel: &CancellationToken,
    progress: &ProgressFn,
) -> Result<Vec<u8>, NetError> {
    if cancel.is_cancelled() {
        return Err(NetError::Cancelled);
    }
    tracing::info!(%url, "downloading");
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(NetError::Cancelled),
        result = transport.fetch(url, progress) => result,
    };
    let result = if cancel.is_cancelled() {
        Err(NetError::Cancelled)
    } else {
        result
    };
    match &result {
        Ok(bytes) => tracing::info!(%url, bytes = bytes.len(), "download finished"),
        Err(err) => tracing::info!(%url, %err, "download failed"),
    }
    result
}

/// A file to materialize under the cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    /// Logical name, used as the path relative to the cache root.
    pub name: String,
    /// Expected git blob SHA-1 of the content.
    pub sha: String,
    /// Canonical source URL, before mirror rewriting.
    pub url: Url,
}

/// Fetches files through a transport, a mirror table and a cache.
pub struct Downloader<T, R> {
    transport: T,
    mirrors: MirrorTable,
    rng: R,
}

impl<T: Transport, R: Rng + Send> Downloader<T, R> {
    /// Creates a downloader.
    pub fn new(transport: T, mirrors: MirrorTable, rng: R) -> Self {
        Self {
            transport,
            mirrors,
            rng,
        }
    }

    /// Returns the local path of `request`, downloading it if needed.
    ///
    /// A cache hit returns immediately without calling the transport.
    /// Otherwise the URL is rewritten through the mirror table, the content is
    /// downloaded and checked against `request.sha`, written to
    /// `<root>/<name>`, and recorded in the cache, which is then saved.
    pub async fn fetch_cached(
        &mut self,
        cache: &mut FileCache,
        request: &FileRequest,
        cancel: &CancellationToken,
        progress: &ProgressFn,
    ) -> Result<PathBuf, NetError> {
        validate_name(&request.name)
            .map_err(|_| NetError::InvalidName(request.name.clone()))?;
        if let Some(path) = cache.get(&request.name, &request.sha) {
            return Ok(path);
        }

        let url = self.mirrors.rewrite(&request.url, &mut self.rng)?;
        let bytes = download(&self.transport, &url, cancel, progress).await?;

        let actual = git_blob_sha1(&bytes);
        if actual != request.sha {
            return Err(NetError::ShaMismatch {
                name: request.name.clone(),
                expected: request.sha.clone(),
                actual,
            });
        }

        let path = cache.root().join(&request.name);
        write_file(&path, &bytes).await?;
        cache.add(&request.name, &request.sha)?;
        cache.save()?;
        Ok(path)
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), NetError> {
    let io_err = |source: std::io::Error| NetError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    tokio::fs::write(path, bytes).await.map_err(io_err)
}
