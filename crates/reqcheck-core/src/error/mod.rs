//! Error types and result aliases for reqcheck operations.
//!
//! Provides a unified error type that covers all failure conditions across
//! the reqcheck crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all reqcheck operations
#[derive(Error, Debug)]
pub enum ReqError {
    // Declaration errors
    #[error("Invalid package name '{name}' at line {line}")]
    InvalidName { name: String, line: usize },

    #[error("Invalid version '{version}' at line {line}: {reason}")]
    InvalidVersion {
        version: String,
        line: usize,
        reason: String,
    },

    #[error("Unknown version operator '{op}' at line {line}")]
    UnknownOperator { op: String, line: usize },

    #[error("Multiple constraints for '{name}' at line {line}; each declaration takes at most one")]
    MultipleConstraints { name: String, line: usize },

    #[error("Unsupported requirement syntax at line {line}: found '{found}'")]
    UnsupportedSyntax { found: String, line: usize },

    // Validation errors
    #[error(
        "Conflicting constraints for '{name}': '{first}' (line {first_line}) cannot be satisfied together with '{second}' (line {second_line})"
    )]
    ConflictingConstraints {
        name: String,
        first: String,
        first_line: usize,
        second: String,
        second_line: usize,
    },

    #[error("No declaration named '{name}' in the manifest")]
    DeclarationNotFound { name: String },

    // CLI errors
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("Manifest '{path}' is not canonically formatted")]
    NotCanonical { path: String },

    #[error("Validation failed: {errors} error(s) across {files} file(s)")]
    ChecksFailed { errors: usize, files: usize },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for reqcheck operations
pub type ReqResult<T> = Result<T, ReqError>;

impl ReqError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReqError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ReqError::InvalidName { .. } => {
                Some("Package names must start and end with a letter or digit and may contain '-', '_' or '.'")
            },
            ReqError::UnknownOperator { .. } => {
                Some("Supported operators are ==, !=, >=, >, <=, < and ~=")
            },
            ReqError::MultipleConstraints { .. } => {
                Some("Keep a single comparison per line; this format does not support constraint ranges")
            },
            ReqError::UnsupportedSyntax { .. } => {
                Some("Only 'name' or 'name<op><version>' lines are supported; extras and environment markers are not")
            },
            ReqError::ConflictingConstraints { .. } => {
                Some("Remove one of the duplicate declarations or relax a constraint so both can be satisfied")
            },
            ReqError::NotCanonical { .. } => {
                Some("Run 'reqcheck fmt' without --check to rewrite the file")
            },
            ReqError::ChecksFailed { .. } => {
                Some("Fix the reported lines, then re-run 'reqcheck check'")
            },
            _ => None,
        }
    }
}
