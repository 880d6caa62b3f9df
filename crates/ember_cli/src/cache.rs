//! `ember cache` — inspect and edit the download cache index.

use std::io::{self, Write};
use std::path::Path;

use ember_cache::FileCache;
use ember_config::load_config_or_default;

use crate::{CacheAction, CacheArgs, GlobalArgs};

/// Runs the `ember cache` command against the configured cache root.
///
/// Returns exit code 0 on success and 1 when `get` misses.
pub fn run(args: &CacheArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = global.project_dir()?;
    let config = load_config_or_default(&project_dir)?;
    let root = config.cache_root(&project_dir);
    let mut out = io::stdout().lock();
    execute(&args.action, &root, args.reset, global.quiet, &mut out)
}

/// Performs a cache action, writing results to `out`.
pub fn execute(
    action: &CacheAction,
    root: &Path,
    reset: bool,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut cache = if reset {
        FileCache::open_or_recreate(root)?
    } else {
        FileCache::open(root)?
    };

    match action {
        CacheAction::List => {
            for entry in cache.entries() {
                writeln!(out, "{}  {}", entry.sha, entry.name)?;
            }
            Ok(0)
        }
        CacheAction::Add { name, sha } => {
            cache.add(name, sha)?;
            cache.save()?;
            if !quiet {
                eprintln!("    Recorded {name} ({sha})");
            }
            Ok(0)
        }
        CacheAction::Get { name, sha } => match cache.get(name, sha) {
            Some(path) => {
                writeln!(out, "{}", path.display())?;
                Ok(0)
            }
            None => Ok(1),
        },
        CacheAction::Clear { name } => {
            cache.clear(name.as_deref());
            cache.save()?;
            if !quiet {
                match name {
                    Some(name) => eprintln!("     Cleared {name}"),
                    None => eprintln!("     Cleared all entries"),
                }
            }
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(action: CacheAction, root: &Path, reset: bool) -> (i32, String) {
        let mut out = Vec::new();
        let code = execute(&action, root, reset, true, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn add(name: &str, sha: &str) -> CacheAction {
        CacheAction::Add {
            name: name.to_string(),
            sha: sha.to_string(),
        }
    }

    fn get(name: &str, sha: &str) -> CacheAction {
        CacheAction::Get {
            name: name.to_string(),
            sha: sha.to_string(),
        }
    }

    #[test]
    fn add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        exec(add("a.bin", "111"), dir.path(), false);
        exec(add("b.bin", "222"), dir.path(), false);
        let (code, out) = exec(CacheAction::List, dir.path(), false);
        assert_eq!(code, 0);
        assert_eq!(out, "111  a.bin\n222  b.bin\n");
    }

    #[test]
    fn get_hit_and_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), b"x").unwrap();
        exec(add("a.bin", "111"), dir.path(), false);

        let (code, out) = exec(get("a.bin", "111"), dir.path(), false);
        assert_eq!(code, 0);
        assert_eq!(out.trim(), dir.path().join("a.bin").display().to_string());

        let (code, out) = exec(get("a.bin", "999"), dir.path(), false);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn clear_one_and_all() {
        let dir = tempfile::tempdir().unwrap();
        exec(add("a", "1"), dir.path(), false);
        exec(add("b", "2"), dir.path(), false);

        exec(
            CacheAction::Clear {
                name: Some("a".to_string()),
            },
            dir.path(),
            false,
        );
        assert_eq!(exec(CacheAction::List, dir.path(), false).1, "2  b\n");

        exec(CacheAction::Clear { name: None }, dir.path(), false);
        assert!(exec(CacheAction::List, dir.path(), false).1.is_empty());
    }

    #[test]
    fn add_rejects_names_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = execute(&add("/etc/hostname", "x"), dir.path(), false, true, &mut out).unwrap_err();
        assert!(err.to_string().contains("invalid cache name"));
        assert!(!dir.path().join("cache.json").exists());

        let (code, out) = exec(get("", "x"), dir.path(), false);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn corrupt_cache_requires_reset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cache.json"), "garbage").unwrap();

        let mut out = Vec::new();
        let err = execute(&CacheAction::List, dir.path(), false, true, &mut out).unwrap_err();
        assert!(err.to_string().contains("corrupt cache document"));

        let (code, _) = exec(add("a", "1"), dir.path(), true);
        assert_eq!(code, 0);
        assert_eq!(exec(CacheAction::List, dir.path(), false).1, "1  a\n");
    }
}
