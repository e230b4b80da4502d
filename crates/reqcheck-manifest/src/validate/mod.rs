//! Manifest well-formedness validation.
//!
//! The parser already guarantees each line is syntactically valid; this
//! pass checks the manifest as a whole. The one hard rule: a package must
//! not be declared twice with constraints that cannot both be satisfied.

use crate::Manifest;
use indexmap::IndexMap;
use reqcheck_core::types::Declaration;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single validation finding
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub name: String,
    pub line: usize,
    pub related_line: Option<usize>,
    pub message: String,
}

/// Validation options
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Warn about declarations that are not exact pins
    pub require_pins: bool,
}

/// Validate a parsed manifest, returning all findings in file order
pub fn validate(manifest: &Manifest, options: &ValidateOptions) -> Vec<Finding> {
    let mut findings = Vec::new();

    // Group declarations by normalized name, preserving first-seen order
    let mut groups: IndexMap<String, Vec<&Declaration>> = IndexMap::new();
    for declaration in manifest.declarations() {
        groups
            .entry(declaration.normalized_name())
            .or_default()
            .push(declaration);
    }

    for (name, declarations) in &groups {
        for (i, later) in declarations.iter().enumerate().skip(1) {
            let mut conflicted = false;

            for earlier in &declarations[..i] {
                if later.conflicts_with(earlier) {
                    conflicted = true;
                    findings.push(Finding {
                        severity: Severity::Error,
                        name: name.clone(),
                        line: later.line,
                        related_line: Some(earlier.line),
                        message: format!(
                            "conflicting constraints: '{}' cannot be satisfied together with '{}' (line {})",
                            later, earlier, earlier.line
                        ),
                    });
                }
            }

            if !conflicted {
                findings.push(Finding {
                    severity: Severity::Warning,
                    name: name.clone(),
                    line: later.line,
                    related_line: Some(declarations[0].line),
                    message: format!(
                        "duplicate declaration of '{}' (first declared at line {})",
                        name, declarations[0].line
                    ),
                });
            }
        }
    }

    if options.require_pins {
        for declaration in manifest.declarations() {
            if !declaration.is_pinned() {
                findings.push(Finding {
                    severity: Severity::Warning,
                    name: declaration.normalized_name(),
                    line: declaration.line,
                    related_line: None,
                    message: format!("'{}' is not pinned to an exact version", declaration),
                });
            }
        }
    }

    findings.sort_by_key(|finding| finding.line);
    debug!(findings = findings.len(), "validated manifest");

    findings
}

/// Check if any finding is an error
pub fn has_errors(findings: &[Finding]) -> bool {
    findings
        .iter()
        .any(|finding| finding.severity == Severity::Error)
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: line {}: {}", self.severity, self.line, self.message)
    }
}
