//! Manifest editing operations.
//!
//! Edits work on the parsed line structure, so comments and blank lines in
//! the file are left exactly where the author put them.

use crate::{Manifest, ManifestLine};
use reqcheck_core::types::Declaration;
use tracing::debug;

impl Manifest {
    /// Insert a declaration, replacing the constraint of an existing
    /// declaration of the same (normalized) package in place. Returns true
    /// if an existing declaration was replaced.
    pub fn upsert(&mut self, declaration: Declaration) -> bool {
        let name = declaration.normalized_name();

        for line in &mut self.lines {
            if let ManifestLine::Declaration {
                declaration: existing,
                ..
            } = line
            {
                if existing.normalized_name() == name {
                    debug!(package = %name, "replacing existing declaration");
                    existing.constraint = declaration.constraint.clone();
                    return true;
                }
            }
        }

        debug!(package = %name, "appending new declaration");
        self.lines.push(ManifestLine::Declaration {
            declaration,
            comment: None,
        });
        false
    }

    /// Remove every declaration of a package, matching by normalized name.
    /// Returns the number of lines removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let normalized = Declaration::normalize_name(name);
        let before = self.lines.len();

        self.lines.retain(|line| match line {
            ManifestLine::Declaration { declaration, .. } => {
                declaration.normalized_name() != normalized
            },
            _ => true,
        });

        let removed = before - self.lines.len();
        debug!(package = %normalized, removed, "removed declarations");
        removed
    }

    /// Check whether a package is declared, matching by normalized name
    pub fn contains(&self, name: &str) -> bool {
        let normalized = Declaration::normalize_name(name);
        self.declarations()
            .any(|declaration| declaration.normalized_name() == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_manifest;

    #[test]
    fn test_upsert_appends() {
        let mut manifest = parse_manifest("numpy>=1.16.2\n").unwrap();
        let decl = Declaration::new("scipy".to_string(), Some(">=1.0".parse().unwrap()));

        assert!(!manifest.upsert(decl));
        assert_eq!(manifest.to_string(), "numpy>=1.16.2\nscipy>=1.0\n");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let content = "# pinned for reproducibility\ntensorflow==1.14.0\nnumpy>=1.16.2\n";
        let mut manifest = parse_manifest(content).unwrap();
        let decl = Declaration::new("tensorflow".to_string(), Some("==2.1.0".parse().unwrap()));

        assert!(manifest.upsert(decl));
        assert_eq!(
            manifest.to_string(),
            "# pinned for reproducibility\ntensorflow==2.1.0\nnumpy>=1.16.2\n"
        );
    }

    #[test]
    fn test_upsert_matches_normalized_name() {
        let mut manifest = parse_manifest("scikit_learn>=0.21\n").unwrap();
        let decl = Declaration::new("Scikit-Learn".to_string(), Some("==0.21.3".parse().unwrap()));

        assert!(manifest.upsert(decl));
        // the original spelling is kept, only the constraint changes
        assert_eq!(manifest.to_string(), "scikit_learn==0.21.3\n");
    }

    #[test]
    fn test_remove() {
        let content = "# stack\nnumpy>=1.16.2\nnetworkx\nnumpy>=1.18\n";
        let mut manifest = parse_manifest(content).unwrap();

        assert_eq!(manifest.remove("numpy"), 2);
        assert_eq!(manifest.to_string(), "# stack\nnetworkx\n");
        assert_eq!(manifest.remove("numpy"), 0);
    }

    #[test]
    fn test_remove_keeps_comments() {
        let content = "# keep me\nnumpy>=1.16.2  # and me? no\n";
        let mut manifest = parse_manifest(content).unwrap();

        assert_eq!(manifest.remove("numpy"), 1);
        assert_eq!(manifest.to_string(), "# keep me\n");
    }

    #[test]
    fn test_contains() {
        let manifest = parse_manifest("scikit_learn>=0.21\n").unwrap();
        assert!(manifest.contains("Scikit-Learn"));
        assert!(!manifest.contains("numpy"));
    }
}
