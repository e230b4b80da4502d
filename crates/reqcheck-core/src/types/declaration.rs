//! Dependency declaration types.
//!
//! A declaration is a single manifest entry: one package name and at most
//! one version constraint.

use super::{Constraint, Op};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency declaration (one manifest line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub constraint: Option<Constraint>,
    /// 1-based line in the source manifest, 0 for synthesized declarations
    pub line: usize,
}

impl Declaration {
    /// Create a new declaration
    pub fn new(name: String, constraint: Option<Constraint>) -> Self {
        Self {
            name,
            constraint,
            line: 0,
        }
    }

    /// Record the source line this declaration came from
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Check if a package name is well-formed
    pub fn is_valid_name(name: &str) -> bool {
        let first_ok = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let last_ok = name
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());

        first_ok
            && last_ok
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }

    /// Normalize a package name for comparison: lowercase with runs of
    /// '-', '_' and '.' folded to a single '-'
    pub fn normalize_name(name: &str) -> String {
        let mut normalized = String::with_capacity(name.len());
        let mut in_separator = false;

        for c in name.chars() {
            if matches!(c, '-' | '_' | '.') {
                in_separator = true;
            } else {
                if in_separator {
                    normalized.push('-');
                    in_separator = false;
                }
                normalized.push(c.to_ascii_lowercase());
            }
        }

        normalized
    }

    /// The normalized form of this declaration's name
    pub fn normalized_name(&self) -> String {
        Self::normalize_name(&self.name)
    }

    /// Check if this declaration pins an exact version
    pub fn is_pinned(&self) -> bool {
        matches!(
            self.constraint,
            Some(Constraint { op: Op::Exact, .. })
        )
    }

    /// Check if this declaration names the same package as another
    pub fn same_package(&self, other: &Declaration) -> bool {
        self.normalized_name() == other.normalized_name()
    }

    /// Check if the constraints of two declarations cannot both be
    /// satisfied. Declarations without a constraint never conflict.
    pub fn conflicts_with(&self, other: &Declaration) -> bool {
        match (&self.constraint, &other.constraint) {
            (Some(a), Some(b)) => a.conflicts_with(b),
            _ => false,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref constraint) = self.constraint {
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_creation() {
        let constraint: Constraint = ">=1.16.2".parse().unwrap();
        let decl = Declaration::new("numpy".to_string(), Some(constraint.clone())).at_line(3);

        assert_eq!(decl.name, "numpy");
        assert_eq!(decl.constraint, Some(constraint));
        assert_eq!(decl.line, 3);
    }

    #[test]
    fn test_valid_package_names() {
        assert!(Declaration::is_valid_name("numpy"));
        assert!(Declaration::is_valid_name("scikit-learn"));
        assert!(Declaration::is_valid_name("ruamel.yaml"));
        assert!(Declaration::is_valid_name("typing_extensions"));
        assert!(Declaration::is_valid_name("a"));

        assert!(!Declaration::is_valid_name(""));
        assert!(!Declaration::is_valid_name("-numpy"));
        assert!(!Declaration::is_valid_name("numpy-"));
        assert!(!Declaration::is_valid_name("num py"));
        assert!(!Declaration::is_valid_name("numpy!"));
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(Declaration::normalize_name("NumPy"), "numpy");
        assert_eq!(Declaration::normalize_name("scikit_learn"), "scikit-learn");
        assert_eq!(Declaration::normalize_name("ruamel.yaml"), "ruamel-yaml");
        assert_eq!(Declaration::normalize_name("a--b__c"), "a-b-c");
    }

    #[test]
    fn test_same_package() {
        let a = Declaration::new("Scikit_Learn".to_string(), None);
        let b = Declaration::new("scikit-learn".to_string(), None);
        let c = Declaration::new("numpy".to_string(), None);

        assert!(a.same_package(&b));
        assert!(!a.same_package(&c));
    }

    #[test]
    fn test_is_pinned() {
        let pinned =
            Declaration::new("tensorflow".to_string(), Some("==1.14.0".parse().unwrap()));
        let bounded = Declaration::new("numpy".to_string(), Some(">=1.16.2".parse().unwrap()));
        let bare = Declaration::new("networkx".to_string(), None);

        assert!(pinned.is_pinned());
        assert!(!bounded.is_pinned());
        assert!(!bare.is_pinned());
    }

    #[test]
    fn test_conflicts() {
        let pinned =
            Declaration::new("tensorflow".to_string(), Some("==1.14.0".parse().unwrap()));
        let newer = Declaration::new("tensorflow".to_string(), Some(">=2.0".parse().unwrap()));
        let bare = Declaration::new("tensorflow".to_string(), None);

        assert!(pinned.conflicts_with(&newer));
        assert!(!pinned.conflicts_with(&bare));
        assert!(!bare.conflicts_with(&newer));
    }

    #[test]
    fn test_declaration_json() {
        let decl = Declaration::new("numpy".to_string(), Some(">=1.16.2".parse().unwrap()));
        let value = serde_json::to_value(&decl).unwrap();

        assert_eq!(value["name"], "numpy");
        assert_eq!(value["constraint"]["op"], "GreaterEq");
    }

    #[test]
    fn test_declaration_display() {
        let decl = Declaration::new("numpy".to_string(), Some(">=1.16.2".parse().unwrap()));
        assert_eq!(decl.to_string(), "numpy>=1.16.2");

        let bare = Declaration::new("networkx".to_string(), None);
        assert_eq!(bare.to_string(), "networkx");
    }
}
