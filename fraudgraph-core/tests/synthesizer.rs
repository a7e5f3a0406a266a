//! Integration tests for the synthesizer.

mod common;

use fraudgraph_core::{
    LabelField, Role, RoleIndex, RoleWeights, SynthesisBuilder, summarize,
};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use common::{neighbours_with_role, small_builder, small_synthesis};

#[test]
fn generated_graph_meets_size_targets() {
    let synthesis = small_synthesis(42);
    let graph = &synthesis.graph;
    assert_eq!(graph.node_count(), 300);
    assert!(graph.edge_count() >= 900);
    assert_eq!(graph.metadata().num_nodes, Some(300));
    assert_eq!(graph.metadata().target_edges, Some(900));
    assert_eq!(
        synthesis.topology.base_edges + synthesis.topology.top_up_edges,
        graph.edge_count()
    );
    assert!(graph.is_fully_labelled());
}

#[test]
fn same_seed_is_reproducible_across_runs() {
    let synthesizer = small_builder(7).build().expect("valid configuration");
    let first = synthesizer.generate().expect("first run");
    let second = synthesizer.generate().expect("second run");
    assert_eq!(first, second);

    let mut rng = SmallRng::seed_from_u64(7);
    let explicit = synthesizer
        .generate_with_rng(&mut rng)
        .expect("explicit rng");
    assert_eq!(explicit.graph, first.graph);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn augmentation_links_fraud_to_accomplices(#[case] max_edges: usize) {
    let mut synthesis = small_synthesis(11);
    let synthesizer = small_builder(11)
        .with_max_accomplice_edges(max_edges)
        .build()
        .expect("valid configuration");
    let before = synthesis.graph.edge_count();
    let mut rng = synthesizer.rng();
    let report = synthesizer
        .augment(&mut synthesis.graph, &mut rng)
        .expect("augmentation");
    assert_eq!(synthesis.graph.edge_count(), before + report.edges_added);

    let index = RoleIndex::build(&synthesis.graph).expect("labelled");
    let floor = max_edges.min(index.nodes(Role::Accomplice).len());
    for &fraud in index.nodes(Role::Fraud) {
        assert!(neighbours_with_role(&synthesis, fraud, Role::Accomplice) >= floor);
    }
}

#[test]
fn all_fraud_scenario_keeps_exact_edge_count() {
    let synthesizer = SynthesisBuilder::new()
        .with_num_nodes(10)
        .with_target_edges(15)
        .with_state_distribution(RoleWeights::new(1.0, 0.0, 0.0))
        .build()
        .expect("valid configuration");
    let mut synthesis = synthesizer.generate().expect("generation");
    assert_eq!(synthesis.graph.edge_count(), 15);
    assert_eq!(synthesis.assignment.counts.get(Role::Fraud), 10);

    let mut rng = synthesizer.rng();
    let report = synthesizer
        .augment(&mut synthesis.graph, &mut rng)
        .expect("augmentation");
    assert_eq!(report.edges_added, 0);
    assert_eq!(synthesis.graph.edge_count(), 15);
}

#[test]
fn summary_reflects_generated_graph() {
    let synthesis = small_synthesis(3);
    let summary = summarize(&synthesis.graph, 5);
    assert_eq!(summary.node_count, 300);
    assert_eq!(summary.edge_count, synthesis.graph.edge_count());
    assert_eq!(summary.target_edges, Some(900));
    assert_eq!(summary.true_state.counts, synthesis.assignment.counts);
    assert_eq!(
        summary.true_state.target,
        Some(RoleWeights::default_state_distribution())
    );
    assert_eq!(summary.state.total(), 300);
    assert_eq!(summary.samples.len(), 5);
    for (position, sample) in summary.samples.iter().enumerate() {
        assert_eq!(sample.id.get(), position);
        let labels = sample.labels.expect("sampled node is labelled");
        assert_eq!(
            labels.role(LabelField::TrueState),
            labels.true_state
        );
        assert_eq!(labels.belief, RoleWeights::uniform());
    }
}

#[test]
fn small_graphs_saturate_instead_of_hanging() {
    let synthesis = SynthesisBuilder::new()
        .with_num_nodes(5)
        .with_target_edges(1_000)
        .build()
        .expect("valid configuration")
        .generate()
        .expect("generation terminates");
    assert_eq!(synthesis.graph.edge_count(), 10);
    assert!(synthesis.topology.saturated);
}
