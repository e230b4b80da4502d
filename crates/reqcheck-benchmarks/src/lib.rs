//! Reqcheck benchmarking suite
//!
//! This crate contains benchmarks for manifest parsing and validation
//! performance across different manifest sizes.

pub mod common;

pub use common::*;
