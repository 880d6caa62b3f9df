//! Ember CLI — command-line access to the embedded toolchain helpers.
//!
//! Provides `ember cache` for inspecting and editing the download cache,
//! `ember hash` for file digests, `ember compare` for version strings, and
//! `ember mirror` for previewing mirror rewrites.

#![warn(missing_docs)]

mod cache;
mod compare;
mod hash;
mod logging;
mod mirror;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Ember — utility helpers for embedded development tooling.
#[derive(Parser, Debug)]
#[command(name = "ember", version, about = "Ember embedded tooling helpers")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory containing `ember.toml` (defaults to the current directory).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or edit the download cache index.
    Cache(CacheArgs),
    /// Print the digest of a file.
    Hash(HashArgs),
    /// Compare two version strings.
    Compare {
        /// Left-hand version.
        a: String,
        /// Right-hand version.
        b: String,
    },
    /// Show how a URL is rewritten by the configured mirrors.
    Mirror {
        /// The URL to rewrite.
        url: String,

        /// Seed for mirror selection, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Arguments for the `ember cache` subcommand.
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Start from an empty index if `cache.json` is corrupt.
    #[arg(long)]
    pub reset: bool,

    /// The cache operation to perform.
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Operations on the cache index.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CacheAction {
    /// List recorded entries.
    List,
    /// Record a file's hash and save the index.
    Add {
        /// Logical name, relative to the cache root.
        name: String,
        /// Hex content hash.
        sha: String,
    },
    /// Print the cached path for a name and hash; exits 1 on a miss.
    Get {
        /// Logical name, relative to the cache root.
        name: String,
        /// Hex content hash.
        sha: String,
    },
    /// Remove one entry, or all entries when no name is given, and save.
    Clear {
        /// Entry to remove.
        name: Option<String>,
    },
}

/// Arguments for the `ember hash` subcommand.
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// File to hash.
    pub file: PathBuf,

    /// Digest to compute (defaults to `cache.algorithm` from `ember.toml`).
    #[arg(short, long, value_enum)]
    pub algorithm: Option<HashKind>,
}

/// Digest choices for `ember hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HashKind {
    /// SHA-256.
    Sha256,
    /// SHA-1.
    Sha1,
    /// MD5.
    Md5,
    /// Git blob id (SHA-1 over a `blob <len>` header).
    GitBlob,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional project directory holding `ember.toml`.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// Returns the project directory: `--config` or the current directory.
    pub fn project_dir(&self) -> std::io::Result<PathBuf> {
        match &self.config {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    if let Err(e) = logging::init(&global) {
        eprintln!("warning: {e}");
    }

    let result = match cli.command {
        Command::Cache(ref args) => cache::run(args, &global),
        Command::Hash(ref args) => hash::run(args, &global),
        Command::Compare { ref a, ref b } => compare::run(a, b),
        Command::Mirror { ref url, seed } => mirror::run(url, seed, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_cache_add() {
        let cli = Cli::parse_from(["ember", "cache", "add", "bin/openocd", "abc123"]);
        match cli.command {
            Command::Cache(args) => {
                assert!(!args.reset);
                assert_eq!(
                    args.action,
                    CacheAction::Add {
                        name: "bin/openocd".to_string(),
                        sha: "abc123".to_string()
                    }
                );
            }
            _ => panic!("expected Cache command"),
        }
    }

    #[test]
    fn parse_cache_clear_all_with_reset() {
        let cli = Cli::parse_from(["ember", "cache", "--reset", "clear"]);
        match cli.command {
            Command::Cache(args) => {
                assert!(args.reset);
                assert_eq!(args.action, CacheAction::Clear { name: None });
            }
            _ => panic!("expected Cache command"),
        }
    }

    #[test]
    fn parse_hash_with_algorithm() {
        let cli = Cli::parse_from(["ember", "hash", "fw.bin", "--algorithm", "git-blob"]);
        match cli.command {
            Command::Hash(args) => {
                assert_eq!(args.file, PathBuf::from("fw.bin"));
                assert_eq!(args.algorithm, Some(HashKind::GitBlob));
            }
            _ => panic!("expected Hash command"),
        }
    }

    #[test]
    fn parse_hash_default_algorithm() {
        let cli = Cli::parse_from(["ember", "hash", "fw.bin"]);
        match cli.command {
            Command::Hash(args) => assert!(args.algorithm.is_none()),
            _ => panic!("expected Hash command"),
        }
    }

    #[test]
    fn parse_compare() {
        let cli = Cli::parse_from(["ember", "compare", "1.2", "1.10"]);
        match cli.command {
            Command::Compare { a, b } => {
                assert_eq!(a, "1.2");
                assert_eq!(b, "1.10");
            }
            _ => panic!("expected Compare command"),
        }
    }

    #[test]
    fn parse_mirror_with_seed() {
        let cli = Cli::parse_from(["ember", "mirror", "https://github.com/x", "--seed", "7"]);
        match cli.command {
            Command::Mirror { url, seed } => {
                assert_eq!(url, "https://github.com/x");
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected Mirror command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["ember", "--quiet", "--config", "proj", "cache", "list"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("proj"));
    }

    #[test]
    fn project_dir_prefers_config_flag() {
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            config: Some("/work/board".to_string()),
        };
        assert_eq!(global.project_dir().unwrap(), PathBuf::from("/work/board"));
    }
}
