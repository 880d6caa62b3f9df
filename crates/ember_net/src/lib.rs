//! Network-facing helpers for fetching embedded toolchain artifacts.
//!
//! The transport itself is supplied by the host through [`Transport`]. This
//! crate adds mirror host rewriting, cancellation with a single terminal
//! outcome, and a cache-aware fetch that verifies git blob hashes before
//! recording files in a [`FileCache`](ember_cache::FileCache).

#![warn(missing_docs)]

pub mod download;
pub mod error;
pub mod mirror;

pub use download::{download, Downloader, FileRequest, Progress, ProgressFn, Transport};
pub use error::NetError;
pub use mirror::MirrorTable;
pub use tokio_util::sync::CancellationToken;
pub use url::Url;
