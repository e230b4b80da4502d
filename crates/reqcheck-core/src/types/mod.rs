//! Core data types for requirement manifests.

pub mod constraint;
pub mod declaration;
pub mod version;

pub use constraint::{Constraint, ConstraintError, Op};
pub use declaration::Declaration;
pub use version::{Phase, PreRelease, Version, VersionError};
