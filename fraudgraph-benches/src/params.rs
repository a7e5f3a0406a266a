//! Benchmark parameter types.
//!
//! Each type renders a compact label used as the Criterion benchmark id.

use std::fmt;

/// Size of a generated network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkBenchParams {
    /// Number of nodes.
    pub num_nodes: usize,
    /// Target edge count for the top-up phase.
    pub target_edges: usize,
}

impl NetworkBenchParams {
    /// Keeps the default average degree of the CLI (`30_000 / 7_000`, about
    /// 8.6) while scaling the node count.
    #[must_use]
    pub const fn with_default_density(num_nodes: usize) -> Self {
        let target_edges = match num_nodes.saturating_mul(30).checked_div(7) {
            Some(edges) => edges,
            None => 0,
        };
        Self {
            num_nodes,
            target_edges,
        }
    }
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},e={}", self.num_nodes, self.target_edges)
    }
}

/// Parameters for a collusion augmentation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollusionBenchParams {
    /// Number of nodes in the labelled network.
    pub num_nodes: usize,
    /// Accomplices sampled per Fraud node.
    pub max_accomplice_edges: usize,
}

impl fmt::Display for CollusionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.num_nodes, self.max_accomplice_edges)
    }
}
