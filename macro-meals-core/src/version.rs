//! Dot-separated version strings and their comparison.
//!
//! Versions are compared numerically, segment by segment. A sequence that runs
//! out of segments compares as if padded with zeros, so `1.2` equals `1.2.0`.
//! Android version codes (`"42"`) are single-segment versions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How to treat a segment that is not a base-10 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedVersionPolicy {
    /// Fail the parse. Update checks fed a malformed version do nothing.
    #[default]
    Reject,
    /// Coerce the segment to 0, the way the mobile client always has.
    TreatAsZero,
}

/// Errors produced while parsing a version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Version string is empty")]
    Empty,
    #[error("Invalid segment '{segment}' in version '{version}'")]
    InvalidSegment { version: String, segment: String },
}

/// A parsed version: an ordered list of non-negative integers.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Parse with the given malformed-segment policy.
    pub fn parse_with(raw: &str, policy: MalformedVersionPolicy) -> Result<Self, VersionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return match policy {
                MalformedVersionPolicy::Reject => Err(VersionError::Empty),
                MalformedVersionPolicy::TreatAsZero => Ok(Self { segments: vec![0] }),
            };
        }

        let mut segments = Vec::new();
        for token in trimmed.split('.') {
            match parse_segment(token) {
                Some(value) => segments.push(value),
                None => match policy {
                    MalformedVersionPolicy::Reject => {
                        return Err(VersionError::InvalidSegment {
                            version: raw.to_string(),
                            segment: token.to_string(),
                        });
                    }
                    MalformedVersionPolicy::TreatAsZero => segments.push(0),
                },
            }
        }

        Ok(Self { segments })
    }

    /// Segments as parsed, without padding.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

fn parse_segment(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, MalformedVersionPolicy::Reject)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
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

/// Three-way comparison of two version strings.
pub fn compare_versions(
    a: &str,
    b: &str,
    policy: MalformedVersionPolicy,
) -> Result<Ordering, VersionError> {
    let a = Version::parse_with(a, policy)?;
    let b = Version::parse_with(b, policy)?;
    Ok(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: &str, b: &str) -> Ordering {
        compare_versions(a, b, MalformedVersionPolicy::Reject).unwrap()
    }

    #[test]
    fn test_equal_versions() {
        assert_eq!(cmp("1.2.0", "1.2.0"), Ordering::Equal);
    }

    #[test]
    fn test_ordering_by_first_unequal_segment() {
        assert_eq!(cmp("1.2.3", "1.3.0"), Ordering::Less);
        assert_eq!(cmp("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(cmp("1.10.0", "1.9.0"), Ordering::Greater);
    }

    #[test]
    fn test_missing_segments_are_zero() {
        assert_eq!(cmp("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(cmp("1.2.0.0", "1.2"), Ordering::Equal);
        assert_eq!(cmp("1.2", "1.2.1"), Ordering::Less);
    }

    #[test]
    fn test_single_segment_version_codes() {
        assert_eq!(cmp("41", "42"), Ordering::Less);
        assert_eq!(cmp("100", "99"), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetry() {
        let versions = ["1.0.0", "1.0", "1.2.3", "2", "0.9.12", "10.0.1", "1.2.3.4"];
        for a in versions {
            for b in versions {
                assert_eq!(cmp(a, b), cmp(b, a).reverse(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(cmp(" 1.2.0\n", "1.2"), Ordering::Equal);
    }

    #[test]
    fn test_reject_policy_fails_on_malformed_segment() {
        let err = compare_versions("1.2.beta", "1.2.0", MalformedVersionPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            VersionError::InvalidSegment {
                version: "1.2.beta".to_string(),
                segment: "beta".to_string(),
            }
        );

        assert!(compare_versions("1..2", "1.0.2", MalformedVersionPolicy::Reject).is_err());
        assert!(compare_versions("-1", "0", MalformedVersionPolicy::Reject).is_err());
        assert_eq!(
            compare_versions("", "1.0.0", MalformedVersionPolicy::Reject),
            Err(VersionError::Empty)
        );
    }

    #[test]
    fn test_treat_as_zero_policy_coerces_malformed_segment() {
        let policy = MalformedVersionPolicy::TreatAsZero;
        assert_eq!(
            compare_versions("1.2.beta", "1.2.0", policy).unwrap(),
            Ordering::Equal
        );
        assert_eq!(
            compare_versions("abc", "0.0.1", policy).unwrap(),
            Ordering::Less
        );
        assert_eq!(compare_versions("", "0", policy).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_overflowing_segment_is_malformed() {
        let huge = "99999999999999999999999.0";
        assert!(compare_versions(huge, "1.0", MalformedVersionPolicy::Reject).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let version: Version = "3.04.1".parse().unwrap();
        assert_eq!(version.segments(), &[3, 4, 1]);
        assert_eq!(version.to_string(), "3.4.1");
    }
}
