//! Pre-built networks for benchmarks that measure a single stage.

use fraudgraph_core::{Graph, RoleWeights, TopologyConfig, assign_roles, generate_topology};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::NetworkBenchParams};

/// Generates an unlabelled topology of the requested size.
///
/// # Errors
/// Returns [`BenchSetupError::Synthesis`] when the parameters are invalid.
pub fn topology(params: NetworkBenchParams, seed: u64) -> Result<Graph, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let (graph, _) = generate_topology(
        TopologyConfig {
            num_nodes: params.num_nodes,
            target_edges: params.target_edges,
        },
        &mut rng,
    )?;
    Ok(graph)
}

/// Generates a topology and labels it with the default role distribution.
///
/// # Errors
/// Returns [`BenchSetupError::Synthesis`] when generation or labelling fails.
pub fn labelled(params: NetworkBenchParams, seed: u64) -> Result<Graph, BenchSetupError> {
    let mut graph = topology(params, seed)?;
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    assign_roles(
        &mut graph,
        &RoleWeights::default_state_distribution(),
        &RoleWeights::uniform(),
        &mut rng,
    )?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_networks_are_ready_for_augmentation() {
        let params = NetworkBenchParams::with_default_density(200);
        let graph = labelled(params, 42).expect("valid parameters");
        assert_eq!(graph.node_count(), 200);
        assert!(graph.edge_count() >= params.target_edges);
        assert!(graph.is_fully_labelled());
    }

    #[test]
    fn degenerate_sizes_surface_setup_errors() {
        let err = topology(NetworkBenchParams::with_default_density(1), 42)
            .expect_err("one node is rejected");
        assert!(matches!(err, BenchSetupError::Synthesis(_)));
    }
}
