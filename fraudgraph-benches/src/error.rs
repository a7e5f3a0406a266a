//! Benchmark setup error type.
//!
//! Lets setup helpers propagate pipeline failures with `?` rather than
//! panicking inside library code.

use fraudgraph_core::FraudGraphError;
use fraudgraph_graphml::GraphmlError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Topology generation, role assignment, or augmentation failed.
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] FraudGraphError),
    /// GraphML encoding or decoding failed.
    #[error("GraphML codec failed: {0}")]
    Graphml(#[from] GraphmlError),
}
