//! Version types for requirement files.
//!
//! Provides a Version type for the dotted release numbers found in
//! dependency manifests (1.16.2, 2.3, 3.0.0rc1) with the ordering rules
//! installers apply to them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Release version (dotted numeric segments plus optional pre-release tag)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub release: Vec<u64>,
    pub pre: Option<PreRelease>,
}

/// Pre-release tag (dev, a, b, rc) with a counter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PreRelease {
    pub phase: Phase,
    pub number: u64,
}

/// Pre-release phase in ascending precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Dev,
    Alpha,
    Beta,
    Rc,
}

/// Version parsing and validation errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Invalid pre-release tag: {tag}")]
    InvalidTag { tag: String },
}

impl Version {
    /// Create a release version from its segments
    pub fn new(release: Vec<u64>) -> Self {
        Self { release, pre: None }
    }

    /// Create a pre-release version
    pub fn pre_release(release: Vec<u64>, phase: Phase, number: u64) -> Self {
        Self {
            release,
            pre: Some(PreRelease { phase, number }),
        }
    }

    /// Check if this is a pre-release version
    pub fn is_pre_release(&self) -> bool {
        self.pre.is_some()
    }

    /// Compare release segments with missing trailing segments treated as 0
    fn release_cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());

        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        Ordering::Equal
    }

    /// Precedence comparison (release first, then pre-release tag)
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match self.release_cmp(other) {
            Ordering::Equal => {
                match (&self.pre, &other.pre) {
                    (None, None) => Ordering::Equal,
                    (Some(_), None) => Ordering::Less, // pre-release < final
                    (None, Some(_)) => Ordering::Greater,
                    (Some(a), Some(b)) => a.cmp(b),
                }
            },
            unequal => unequal,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        // The pre-release tag starts at the first alphabetic character
        let (release_part, tag) = match input.find(|c: char| c.is_ascii_alphabetic()) {
            Some(pos) => {
                let (head, tail) = input.split_at(pos);
                // Tolerate a separator between release and tag (1.0-rc1, 1.0.rc1)
                (head.trim_end_matches(['.', '-', '_']), Some(tail))
            },
            None => (input, None),
        };

        if release_part.is_empty() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let mut release = Vec::new();
        for component in release_part.split('.') {
            let segment: u64 = component.parse().map_err(|_| VersionError::InvalidNumber {
                component: component.to_string(),
            })?;
            release.push(segment);
        }

        let pre = match tag {
            Some(tag) => Some(tag.parse()?),
            None => None,
        };

        Ok(Version { release, pre })
    }
}

impl FromStr for PreRelease {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.to_ascii_lowercase();

        let (phase, rest) = if let Some(rest) = tag.strip_prefix("alpha") {
            (Phase::Alpha, rest)
        } else if let Some(rest) = tag.strip_prefix("beta") {
            (Phase::Beta, rest)
        } else if let Some(rest) = tag.strip_prefix("dev") {
            (Phase::Dev, rest)
        } else if let Some(rest) = tag.strip_prefix("rc") {
            (Phase::Rc, rest)
        } else if let Some(rest) = tag.strip_prefix('a') {
            (Phase::Alpha, rest)
        } else if let Some(rest) = tag.strip_prefix('b') {
            (Phase::Beta, rest)
        } else if let Some(rest) = tag.strip_prefix('c') {
            // installers treat "c" as a release candidate
            (Phase::Rc, rest)
        } else {
            return Err(VersionError::InvalidTag {
                tag: s.to_string(),
            });
        };

        let rest = rest.trim_start_matches(['.', '-', '_']);
        let number = if rest.is_empty() {
            0
        } else {
            rest.parse().map_err(|_| VersionError::InvalidTag {
                tag: s.to_string(),
            })?
        };

        Ok(PreRelease { phase, number })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.release {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }

        if let Some(ref pre) = self.pre {
            write!(f, "{}", pre)?;
        }

        Ok(())
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.phase, self.number)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Phase::Dev => "dev",
            Phase::Alpha => "a",
            Phase::Beta => "b",
            Phase::Rc => "rc",
        };
        write!(f, "{}", text)
    }
}

// Equality must agree with ordering: 1.0 and 1.0.0 are the same version
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.precedence_cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = Version::from_str("1.16.2").unwrap();
        assert_eq!(v.release, vec![1, 16, 2]);
        assert_eq!(v.pre, None);

        let v = Version::from_str("2.3").unwrap();
        assert_eq!(v.release, vec![2, 3]);
    }

    #[test]
    fn test_version_with_pre_release() {
        let v = Version::from_str("3.0.0rc1").unwrap();
        assert_eq!(v.release, vec![3, 0, 0]);
        assert_eq!(
            v.pre,
            Some(PreRelease {
                phase: Phase::Rc,
                number: 1
            })
        );

        let v = Version::from_str("1.2.0-alpha.2").unwrap();
        assert_eq!(
            v.pre,
            Some(PreRelease {
                phase: Phase::Alpha,
                number: 2
            })
        );

        let v = Version::from_str("1.0.dev3").unwrap();
        assert_eq!(
            v.pre,
            Some(PreRelease {
                phase: Phase::Dev,
                number: 3
            })
        );
    }

    #[test]
    fn test_invalid_versions() {
        assert!(Version::from_str("").is_err());
        assert!(Version::from_str("abc").is_err());
        assert!(Version::from_str("1..2").is_err());
        assert!(Version::from_str("1.x.2").is_err());
        assert!(Version::from_str("1.0zz1").is_err());
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(vec![1, 14, 0]);
        assert_eq!(v.to_string(), "1.14.0");

        let v = Version::pre_release(vec![3, 0, 0], Phase::Beta, 2);
        assert_eq!(v.to_string(), "3.0.0b2");
    }

    #[test]
    fn test_version_comparison() {
        let v1: Version = "1.0.0".parse().unwrap();
        let v2: Version = "2.0.0".parse().unwrap();
        let v3: Version = "1.1.0".parse().unwrap();

        assert!(v1 < v2);
        assert!(v1 < v3);
        assert!(v3 < v2);
    }

    #[test]
    fn test_zero_padding_equality() {
        let short: Version = "1.0".parse().unwrap();
        let long: Version = "1.0.0".parse().unwrap();

        assert_eq!(short, long);
        assert_eq!(short.cmp(&long), Ordering::Equal);
        assert!(short < "1.0.1".parse().unwrap());
    }

    #[test]
    fn test_pre_release_ordering() {
        let dev: Version = "1.0.0dev1".parse().unwrap();
        let alpha: Version = "1.0.0a1".parse().unwrap();
        let beta: Version = "1.0.0b1".parse().unwrap();
        let rc: Version = "1.0.0rc1".parse().unwrap();
        let finished: Version = "1.0.0".parse().unwrap();

        assert!(dev < alpha);
        assert!(alpha < beta);
        assert!(beta < rc);
        assert!(rc < finished);

        let rc2: Version = "1.0.0rc2".parse().unwrap();
        assert!(rc < rc2);
    }
}
