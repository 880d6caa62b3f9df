//! Lenient dotted version strings with numeric ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric version such as `1.2`, `v4.10.0` or `2.0.1-rc1`.
///
/// Components compare numerically and missing trailing components count as
/// zero, so `1.2 == 1.2.0` and `1.10 > 1.9`. A pre-release or build suffix
/// (anything after the first `-` or `+`) is preserved for display but does
/// not take part in ordering.
#[derive(Clone)]
pub struct Version {
    components: Vec<u64>,
    /// Separator (`-` or `+`) and the text after it.
    suffix: Option<(char, String)>,
}

impl Version {
    /// Returns the numeric components in order.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Returns the pre-release/build suffix, without its leading separator.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_ref().map(|(_, text)| text.as_str())
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
        }
        if let Some((sep, text)) = &self.suffix {
            write!(f, "{sep}{text}")?;
        }
        Ok(())
    }
}

/// Error type for parsing version strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseVersionError {
    /// The input was empty (after trimming and removing a leading `v`).
    #[error("empty version string")]
    Empty,

    /// A dotted component was not an unsigned integer.
    #[error("invalid version component '{0}'")]
    InvalidComponent(String),
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);
        if s.is_empty() {
            return Err(ParseVersionError::Empty);
        }

        let (core, suffix) = match s.char_indices().find(|(_, c)| matches!(c, '-' | '+')) {
            Some((idx, sep)) => (&s[..idx], Some((sep, s[idx + 1..].to_string()))),
            None => (s, None),
        };

        let components = core
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| ParseVersionError::InvalidComponent(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version { components, suffix })
    }
}

/// Parses both strings and compares them as versions.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, ParseVersionError> {
    let a: Version = a.parse()?;
    let b: Version = b.parse()?;
    Ok(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let v: Version = "1.2.3".parse().unwrap();
        assert_eq!(v.components(), &[1, 2, 3]);
        assert!(v.suffix().is_none());
    }

    #[test]
    fn parse_leading_v_and_suffix() {
        let v: Version = "v4.10.0-rc1".parse().unwrap();
        assert_eq!(v.components(), &[4, 10, 0]);
        assert_eq!(v.suffix(), Some("rc1"));
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare_versions("1.10", "1.9").unwrap(), Ordering::Greater);
        assert_eq!(compare_versions("0.9.9", "0.10").unwrap(), Ordering::Less);
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0").unwrap(), Ordering::Equal);
        assert_eq!(compare_versions("2", "1.99.99").unwrap(), Ordering::Greater);
        let a: Version = "1.2".parse().unwrap();
        let b: Version = "1.2.0.0".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn suffix_ignored_in_ordering() {
        assert_eq!(
            compare_versions("1.0.0-beta", "1.0.0").unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Version>().unwrap_err(), ParseVersionError::Empty);
        assert_eq!("v".parse::<Version>().unwrap_err(), ParseVersionError::Empty);
        assert_eq!(
            "1.x.3".parse::<Version>().unwrap_err(),
            ParseVersionError::InvalidComponent("x".to_string())
        );
        assert!("1..2".parse::<Version>().is_err());
        assert!(compare_versions("1.0", "abc").is_err());
    }

    #[test]
    fn display_normalizes() {
        let v: Version = " v1.02.3+build7 ".parse().unwrap();
        assert_eq!(v.to_string(), "1.2.3+build7");
        assert_eq!(format!("{v:?}"), "Version(1.2.3+build7)");
    }

    #[test]
    fn display_keeps_suffix_separator() {
        for input in ["1.2.3+build7", "4.10.0-rc1", "2.0-beta+exp"] {
            let v: Version = input.parse().unwrap();
            assert_eq!(v.to_string(), input);
            let again: Version = v.to_string().parse().unwrap();
            assert_eq!(again.suffix(), v.suffix());
        }
        let v: Version = "2.0-beta+exp".parse().unwrap();
        assert_eq!(v.suffix(), Some("beta+exp"));
    }

    #[test]
    fn sorts_versions() {
        let mut vs: Vec<Version> = ["1.10.0", "1.2", "1.9.1", "0.1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        vs.sort();
        let out: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
        assert_eq!(out, vec!["0.1", "1.2", "1.9.1", "1.10.0"]);
    }
}
