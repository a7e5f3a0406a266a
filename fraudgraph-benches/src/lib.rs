//! Benchmark support crate for fraudgraph.
//!
//! Provides parameter types and pre-built networks used by the Criterion
//! benchmarks for topology generation, role assignment, collusion
//! augmentation, and GraphML encoding.

pub mod error;
pub mod network;
pub mod params;
