//! Requirements-manifest parsing for reqcheck
//!
//! This crate handles parsing, validation, and editing of line-oriented
//! requirement manifests (requirements.txt and friends), providing the
//! manifest model the reqcheck CLI works on.

pub mod edit;
pub mod parse;
pub mod validate;

// Re-export main types
pub use parse::{load_from_file, parse_manifest, save_to_file, Manifest, ManifestLine};
pub use validate::{has_errors, validate, Finding, Severity, ValidateOptions};

use reqcheck_core::error::ReqError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ReqError>;
