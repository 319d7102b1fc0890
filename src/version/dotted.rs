//! Dotted numeric versions as published by the marketplace
//!
//! Requirement strings coming from the marketplace are loosely formatted
//! (`4.0.0-b1`, `3.x-dev`, stray spaces), so every character that is not an
//! ASCII digit or `.` is dropped before parsing.
//!
//! Examples:
//! - "3.0.0" -> [3, 0, 0]
//! - "v4.1" -> [4, 1]
//! - "4.0.0-b1" -> [4, 0, 1] (the qualifier digit joins the last segment)

use std::cmp::Ordering;
use std::fmt;

use crate::version::error::VersionParseError;

/// A version made of one or more numeric segments
///
/// Missing trailing segments compare as zero, so `1.2` equals `1.2.0`.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Parse a version string after removing noise characters
    pub fn parse_lenient(raw: &str) -> Result<Self, VersionParseError> {
        Self::parse_segments(raw, &strip_noise(raw))
    }

    /// Parse a release version made of digits and dots
    ///
    /// A leading `v` and surrounding whitespace are accepted. A prerelease
    /// (`-rc1`) or build (`+build.7`) suffix is dropped, so `5.0.0-rc1`
    /// compares equal to `5.0.0`.
    pub fn parse_strict(raw: &str) -> Result<Self, VersionParseError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let release = match trimmed.find(['-', '+']) {
            Some(at) => {
                let suffix = &trimmed[at + 1..];
                let valid = !suffix.is_empty()
                    && suffix
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'));
                if !valid {
                    return Err(VersionParseError::Malformed {
                        raw: raw.to_string(),
                        version: trimmed.to_string(),
                    });
                }
                &trimmed[..at]
            }
            None => trimmed,
        };
        Self::parse_segments(raw, release)
    }

    fn parse_segments(raw: &str, version: &str) -> Result<Self, VersionParseError> {
        if version.is_empty() {
            return Err(VersionParseError::Empty(raw.to_string()));
        }

        // `u64::from_str` accepts a leading '+', which is not a version digit
        if !version.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(VersionParseError::Malformed {
                raw: raw.to_string(),
                version: version.to_string(),
            });
        }

        let segments = version
            .split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionParseError::Malformed {
                raw: raw.to_string(),
                version: version.to_string(),
            })?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

/// Keep only ASCII digits and dots
pub fn strip_noise(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
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

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> Version {
        Version::parse_lenient(s).unwrap()
    }

    #[rstest]
    #[case("3.0.0", vec![3, 0, 0])]
    #[case("v4.1", vec![4, 1])]
    #[case(" 5 ", vec![5])]
    #[case("4.0.0-b1", vec![4, 0, 1])]
    #[case("3.12.0-stable", vec![3, 12, 0])]
    fn parse_lenient_strips_noise(#[case] raw: &str, #[case] expected: Vec<u64>) {
        assert_eq!(v(raw).segments(), expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("dev")]
    #[case("*")]
    fn parse_lenient_rejects_versions_without_digits(#[case] raw: &str) {
        assert!(matches!(
            Version::parse_lenient(raw),
            Err(VersionParseError::Empty(_))
        ));
    }

    #[rstest]
    #[case("1..2")]
    #[case(".1")]
    #[case("1.2.")]
    #[case("3.x.0")]
    fn parse_lenient_rejects_empty_segments(#[case] raw: &str) {
        assert!(matches!(
            Version::parse_lenient(raw),
            Err(VersionParseError::Malformed { .. })
        ));
    }

    #[rstest]
    #[case("4.14.2", vec![4, 14, 2])]
    #[case(" v5.0 ", vec![5, 0])]
    #[case("5.0.0-rc1", vec![5, 0, 0])]
    #[case("4.0.0-b1", vec![4, 0, 0])]
    #[case("4.0.0+build.7", vec![4, 0, 0])]
    #[case("v5.1.0-beta.2+exp", vec![5, 1, 0])]
    fn parse_strict_accepts_release_versions(#[case] raw: &str, #[case] expected: Vec<u64>) {
        assert_eq!(Version::parse_strict(raw).unwrap().segments(), expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("latest")]
    #[case("+4.0")]
    #[case("-rc1")]
    #[case("5.0.0-")]
    #[case("5.0.0-rc 1")]
    #[case("4..0")]
    fn parse_strict_rejects_noise(#[case] raw: &str) {
        assert!(Version::parse_strict(raw).is_err());
    }

    #[rstest]
    #[case("1.0.0", "2.0.0", Ordering::Less)]
    #[case("2.0.0", "1.9.9", Ordering::Greater)]
    #[case("1.2", "1.2.0", Ordering::Equal)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("4.0.0.1", "4.0.0", Ordering::Greater)]
    #[case("v3.5.0", "3.5.0", Ordering::Equal)]
    fn cmp_orders_numerically(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(v(a).cmp(&v(b)), expected);
        assert_eq!(v(b).cmp(&v(a)), expected.reverse());
    }

    #[test]
    fn exactly_one_ordering_holds_for_every_pair() {
        let versions = ["0.1", "1.0", "1.0.0", "1.0.1", "1.2", "2", "10.0.0"];
        for a in versions {
            for b in versions {
                let (a, b) = (v(a), v(b));
                let holds = [a < b, a == b, a > b];
                assert_eq!(holds.iter().filter(|h| **h).count(), 1, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(v("v4.0.0-b1").to_string(), "4.0.1");
    }
}
