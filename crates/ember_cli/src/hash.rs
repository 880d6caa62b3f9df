//! `ember hash` — print the digest of a file.

use std::path::Path;

use ember_common::{file_digest, file_git_blob_sha1, DigestAlgorithm, DigestError};
use ember_config::load_config_or_default;

use crate::{GlobalArgs, HashArgs, HashKind};

/// Runs the `ember hash` command.
pub fn run(args: &HashArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let kind = match args.algorithm {
        Some(kind) => kind,
        None => {
            let config = load_config_or_default(&global.project_dir()?)?;
            kind_for(config.cache.algorithm)
        }
    };
    let digest = compute(kind, &args.file)?;
    println!("{digest}  {}", args.file.display());
    Ok(0)
}

fn kind_for(algorithm: DigestAlgorithm) -> HashKind {
    match algorithm {
        DigestAlgorithm::Sha256 => HashKind::Sha256,
        DigestAlgorithm::Sha1 => HashKind::Sha1,
        DigestAlgorithm::Md5 => HashKind::Md5,
    }
}

/// Computes the hex digest of `path` for the chosen kind.
pub fn compute(kind: HashKind, path: &Path) -> Result<String, DigestError> {
    match kind {
        HashKind::Sha256 => file_digest(DigestAlgorithm::Sha256, path),
        HashKind::Sha1 => file_digest(DigestAlgorithm::Sha1, path),
        HashKind::Md5 => file_digest(DigestAlgorithm::Md5, path),
        HashKind::GitBlob => file_git_blob_sha1(path),
    }
}
