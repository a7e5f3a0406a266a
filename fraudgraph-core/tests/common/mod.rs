use fraudgraph_core::{NodeId, Role, Synthesis, SynthesisBuilder};

/// Builder for a graph small enough to keep integration tests fast.
#[must_use]
pub fn small_builder(seed: u64) -> SynthesisBuilder {
    SynthesisBuilder::new()
        .with_num_nodes(300)
        .with_target_edges(900)
        .with_seed(seed)
}

/// Generates the small graph described by [`small_builder`].
#[must_use]
pub fn small_synthesis(seed: u64) -> Synthesis {
    small_builder(seed)
        .build()
        .expect("small configuration is valid")
        .generate()
        .expect("generation succeeds")
}

/// Number of neighbours of `node` whose ground truth is `role`.
#[must_use]
pub fn neighbours_with_role(
    synthesis: &Synthesis,
    node: NodeId,
    role: Role,
) -> usize {
    let graph = &synthesis.graph;
    graph
        .neighbours(node)
        .expect("node in bounds")
        .iter()
        .filter(|neighbour| {
            graph
                .labels(**neighbour)
                .expect("neighbour in bounds")
                .is_some_and(|labels| labels.true_state == role)
        })
        .count()
}
