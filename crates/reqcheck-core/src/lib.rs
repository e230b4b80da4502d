//! # reqcheck-core
//!
//! Core types shared across all reqcheck crates.
//!
//! This crate provides:
//! - Version and PreRelease types with the ordering used by requirement files
//! - Constraint and Op types for version constraints
//! - Declaration for a single manifest entry
//! - ReqError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, Constraint, Declaration)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ReqError, ReqResult};
pub use types::{Constraint, Declaration, Op, Phase, PreRelease, Version};
