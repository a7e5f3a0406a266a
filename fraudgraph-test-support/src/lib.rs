//! Shared test utilities used across fraudgraph crates.

pub mod proptest_profile;
pub mod tracing;
