//! Version constraints (==1.14.0, >=1.16.2, ~=2.3).
//!
//! A constraint is a single comparison operator applied to a version.
//! Besides matching, constraints can be checked pairwise for
//! satisfiability, which is what duplicate detection in manifests needs.

use super::{Version, VersionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Version constraint (operator plus version)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub op: Op,
    pub version: Version,
}

/// Comparison operator for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Exact,      // ==1.14.0
    NotEqual,   // !=1.14.0
    GreaterEq,  // >=1.16.2
    Greater,    // >1.16.2
    LessEq,     // <=2.0
    Less,       // <2.0
    Compatible, // ~=1.4.2
}

/// Constraint parsing errors
#[derive(Error, Debug)]
pub enum ConstraintError {
    #[error("Unknown version operator in '{input}'")]
    UnknownOperator { input: String },

    #[error("Operator '{op}' is missing a version")]
    MissingVersion { op: String },

    #[error("Compatible-release constraint '~={version}' needs at least two release segments")]
    CompatibleTooShort { version: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Inclusive/exclusive interval bounds implied by a constraint.
///
/// `exclude` carries the hole punched by a != constraint. The version
/// space is treated as dense, so an open interval between two distinct
/// versions is never considered empty.
#[derive(Debug, Clone)]
struct Bounds {
    lower: Option<(Version, bool)>,
    upper: Option<(Version, bool)>,
    exclude: Option<Version>,
}

impl Constraint {
    /// Create a new constraint
    pub fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// Check if a version satisfies this constraint
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Exact => version == &self.version,
            Op::NotEqual => version != &self.version,
            Op::GreaterEq => version >= &self.version,
            Op::Greater => version > &self.version,
            Op::LessEq => version <= &self.version,
            Op::Less => version < &self.version,
            Op::Compatible => version >= &self.version && version < &self.compatible_ceiling(),
        }
    }

    /// Check if no version can satisfy both constraints
    pub fn conflicts_with(&self, other: &Constraint) -> bool {
        !self.bounds().intersects(&other.bounds())
    }

    /// Upper bound implied by a compatible-release constraint
    /// (~=1.4.2 means >=1.4.2, <1.5). FromStr requires two release
    /// segments, but constraints built with `new` may carry fewer: a
    /// single segment bumps in place, an empty release yields an empty
    /// ceiling instead of panicking.
    fn compatible_ceiling(&self) -> Version {
        let mut release = self.version.release.clone();
        if release.len() > 1 {
            release.pop();
        }
        if let Some(last) = release.last_mut() {
            *last += 1;
        }
        Version::new(release)
    }

    fn bounds(&self) -> Bounds {
        match self.op {
            Op::Exact => Bounds {
                lower: Some((self.version.clone(), true)),
                upper: Some((self.version.clone(), true)),
                exclude: None,
            },
            Op::NotEqual => Bounds {
                lower: None,
                upper: None,
                exclude: Some(self.version.clone()),
            },
            Op::GreaterEq => Bounds {
                lower: Some((self.version.clone(), true)),
                upper: None,
                exclude: None,
            },
            Op::Greater => Bounds {
                lower: Some((self.version.clone(), false)),
                upper: None,
                exclude: None,
            },
            Op::LessEq => Bounds {
                lower: None,
                upper: Some((self.version.clone(), true)),
                exclude: None,
            },
            Op::Less => Bounds {
                lower: None,
                upper: Some((self.version.clone(), false)),
                exclude: None,
            },
            Op::Compatible => Bounds {
                lower: Some((self.version.clone(), true)),
                upper: Some((self.compatible_ceiling(), false)),
                exclude: None,
            },
        }
    }
}

impl Bounds {
    /// Check whether the intersection of two bound sets is non-empty
    fn intersects(&self, other: &Bounds) -> bool {
        let lower = tightest(self.lower.as_ref(), other.lower.as_ref(), true);
        let upper = tightest(self.upper.as_ref(), other.upper.as_ref(), false);

        if let (Some((low, low_incl)), Some((high, high_incl))) = (&lower, &upper) {
            match low.cmp(high) {
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal => {
                    if !(*low_incl && *high_incl) {
                        return false;
                    }
                },
                std::cmp::Ordering::Less => {},
            }
        }

        // A != hole only empties the intersection when it is a single point
        for exclude in [&self.exclude, &other.exclude].into_iter().flatten() {
            if let (Some((low, true)), Some((high, true))) = (&lower, &upper) {
                if low == high && low == exclude {
                    return false;
                }
            }
        }

        true
    }
}

/// Pick the tighter of two bounds on the same side.
///
/// For lower bounds the larger version wins; for upper bounds the smaller
/// one. On equal versions the exclusive bound is tighter.
fn tightest(
    a: Option<&(Version, bool)>,
    b: Option<&(Version, bool)>,
    is_lower: bool,
) -> Option<(Version, bool)> {
    match (a, b) {
        (None, None) => None,
        (Some(bound), None) | (None, Some(bound)) => Some(bound.clone()),
        (Some((va, ia)), Some((vb, ib))) => match va.cmp(vb) {
            std::cmp::Ordering::Equal => Some((va.clone(), *ia && *ib)),
            std::cmp::Ordering::Less => {
                if is_lower {
                    Some((vb.clone(), *ib))
                } else {
                    Some((va.clone(), *ia))
                }
            },
            std::cmp::Ordering::Greater => {
                if is_lower {
                    Some((va.clone(), *ia))
                } else {
                    Some((vb.clone(), *ib))
                }
            },
        },
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let (op, version_str) = if let Some(stripped) = input.strip_prefix("==") {
            (Op::Exact, stripped)
        } else if let Some(stripped) = input.strip_prefix("!=") {
            (Op::NotEqual, stripped)
        } else if let Some(stripped) = input.strip_prefix(">=") {
            (Op::GreaterEq, stripped)
        } else if let Some(stripped) = input.strip_prefix("<=") {
            (Op::LessEq, stripped)
        } else if let Some(stripped) = input.strip_prefix("~=") {
            (Op::Compatible, stripped)
        } else if let Some(stripped) = input.strip_prefix('>') {
            (Op::Greater, stripped)
        } else if let Some(stripped) = input.strip_prefix('<') {
            (Op::Less, stripped)
        } else {
            return Err(ConstraintError::UnknownOperator {
                input: input.to_string(),
            });
        };

        let version_str = version_str.trim();
        if version_str.is_empty() {
            return Err(ConstraintError::MissingVersion {
                op: op.symbol().to_string(),
            });
        }

        let version: Version = version_str.parse()?;

        if op == Op::Compatible && version.release.len() < 2 {
            return Err(ConstraintError::CompatibleTooShort {
                version: version.to_string(),
            });
        }

        Ok(Constraint { op, version })
    }
}

impl Op {
    /// The operator as written in a manifest
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Exact => "==",
            Op::NotEqual => "!=",
            Op::GreaterEq => ">=",
            Op::Greater => ">",
            Op::LessEq => "<=",
            Op::Less => "<",
            Op::Compatible => "~=",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.version)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
