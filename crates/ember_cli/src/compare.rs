//! `ember compare` — order two version strings.

use std::cmp::Ordering;

use ember_common::compare_versions;

/// Runs the `ember compare` command, printing `<`, `=` or `>`.
pub fn run(a: &str, b: &str) -> Result<i32, Box<dyn std::error::Error>> {
    let ordering = compare_versions(a, b)?;
    println!("{}", symbol(ordering));
    Ok(0)
}

fn symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols() {
        assert_eq!(symbol(compare_versions("1.2", "1.10").unwrap()), "<");
        assert_eq!(symbol(compare_versions("v2.0", "2").unwrap()), "=");
        assert_eq!(symbol(compare_versions("3.0.1", "3.0").unwrap()), ">");
    }

    #[test]
    fn invalid_version_is_error() {
        assert!(run("1.x", "1.0").is_err());
    }
}
