//! Tests for collusion augmentation.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use crate::error::FraudGraphError;
use crate::graph::{Graph, NodeId};
use crate::labels::assign_roles;
use crate::role::{Role, RoleWeights};
use crate::test_utils::{labelled_graph, suite_proptest_config};
use crate::topology::{TopologyConfig, generate_topology};

use super::{RoleIndex, augment_collusion};

fn accomplice_neighbours(graph: &Graph, node: NodeId) -> usize {
    graph
        .neighbours(node)
        .expect("node in bounds")
        .iter()
        .filter(|neighbour| {
            graph
                .labels(**neighbour)
                .expect("neighbour in bounds")
                .is_some_and(|labels| labels.true_state == Role::Accomplice)
        })
        .count()
}

fn synthesized(num_nodes: usize, target_edges: usize, distribution: RoleWeights, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let (mut graph, _) = generate_topology(
        TopologyConfig {
            num_nodes,
            target_edges,
        },
        &mut rng,
    )
    .expect("topology");
    assign_roles(&mut graph, &distribution, &RoleWeights::uniform(), &mut rng).expect("roles");
    graph
}

#[fixture]
fn mixed_roles() -> Graph {
    labelled_graph(&[
        Role::Fraud,
        Role::Accomplice,
        Role::Honest,
        Role::Fraud,
        Role::Accomplice,
        Role::Accomplice,
        Role::Honest,
    ])
}

#[rstest]
fn role_index_partitions_in_id_order(mixed_roles: Graph) {
    let index = RoleIndex::build(&mixed_roles).expect("fully labelled");
    assert_eq!(index.nodes(Role::Fraud), &[NodeId::new(0), NodeId::new(3)]);
    assert_eq!(
        index.nodes(Role::Accomplice),
        &[NodeId::new(1), NodeId::new(4), NodeId::new(5)]
    );
    assert_eq!(index.nodes(Role::Honest), &[NodeId::new(2), NodeId::new(6)]);
}

#[rstest]
#[case::fewer_than_available(2, 2)]
#[case::oversampled(10, 3)]
fn each_fraud_node_reaches_bounded_accomplices(
    mixed_roles: Graph,
    #[case] max_edges: usize,
    #[case] expected: usize,
) {
    let mut graph = mixed_roles;
    let mut rng = SmallRng::seed_from_u64(4);
    let report = augment_collusion(&mut graph, max_edges, &mut rng).expect("augmentation");
    assert_eq!(report.fraud_nodes, 2);
    assert_eq!(report.accomplice_nodes, 3);
    assert_eq!(report.edges_added, expected * 2);
    assert_eq!(report.already_present, 0);
    for fraud in [NodeId::new(0), NodeId::new(3)] {
        assert_eq!(accomplice_neighbours(&graph, fraud), expected);
    }
}

#[rstest]
fn existing_edges_are_counted_not_duplicated(mixed_roles: Graph) {
    let mut graph = mixed_roles;
    graph
        .add_edge(NodeId::new(0), NodeId::new(1), Some(0.4))
        .expect("valid edge");
    let mut rng = SmallRng::seed_from_u64(8);
    let report = augment_collusion(&mut graph, 3, &mut rng).expect("augmentation");
    assert_eq!(report.already_present, 1);
    assert_eq!(report.edges_added, 5);
    assert_eq!(graph.edge_count(), 6);
    let kept = graph
        .edges()
        .iter()
        .find(|edge| edge.source() == NodeId::new(0) && edge.target() == NodeId::new(1))
        .expect("pre-existing edge kept");
    assert_eq!(kept.weight(), Some(0.4));
}

#[test]
fn zero_bound_is_rejected() {
    let mut graph = labelled_graph(&[Role::Fraud, Role::Accomplice]);
    let mut rng = SmallRng::seed_from_u64(1);
    let err = augment_collusion(&mut graph, 0, &mut rng).expect_err("k must be positive");
    assert_eq!(err, FraudGraphError::InvalidMaxAccompliceEdges { got: 0 });
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn unlabelled_graph_is_rejected() {
    let mut graph = Graph::with_node_count(4);
    let mut rng = SmallRng::seed_from_u64(1);
    let err = augment_collusion(&mut graph, 2, &mut rng).expect_err("labels are required");
    assert_eq!(err, FraudGraphError::UnlabelledNode { node: 0 });
}

#[test]
fn all_fraud_network_gains_no_edges() {
    let mut graph = synthesized(10, 15, RoleWeights::new(1.0, 0.0, 0.0), 42);
    assert_eq!(graph.edge_count(), 15);
    let mut rng = SmallRng::seed_from_u64(42);
    let report = augment_collusion(&mut graph, 5, &mut rng).expect("augmentation");
    assert_eq!(report.fraud_nodes, 10);
    assert_eq!(report.edges_added, 0);
    assert_eq!(graph.edge_count(), 15);
}

#[test]
fn repeated_augmentation_never_shrinks_or_duplicates() {
    let mut graph = synthesized(400, 1_200, RoleWeights::default_state_distribution(), 5);
    let mut rng = SmallRng::seed_from_u64(6);
    augment_collusion(&mut graph, 5, &mut rng).expect("first pass");
    let after_first = graph.edge_count();
    augment_collusion(&mut graph, 5, &mut rng).expect("second pass");
    assert!(graph.edge_count() >= after_first);

    let unique: HashSet<_> = graph
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect();
    assert_eq!(unique.len(), graph.edge_count());
}

proptest! {
    #![proptest_config(suite_proptest_config(32))]

    #[test]
    fn fraud_nodes_meet_accomplice_floor(
        num_nodes in 2_usize..150,
        target_edges in 0_usize..400,
        max_edges in 1_usize..8,
        seed in any::<u64>(),
    ) {
        let mut graph = synthesized(
            num_nodes,
            target_edges,
            RoleWeights::default_state_distribution(),
            seed,
        );
        let before = graph.edge_count();
        let mut rng = SmallRng::seed_from_u64(seed);
        let report = augment_collusion(&mut graph, max_edges, &mut rng).expect("augmentation");
        prop_assert_eq!(graph.edge_count(), before + report.edges_added);

        let index = RoleIndex::build(&graph).expect("labelled");
        let floor = max_edges.min(index.nodes(Role::Accomplice).len());
        for &fraud in index.nodes(Role::Fraud) {
            prop_assert!(accomplice_neighbours(&graph, fraud) >= floor);
        }
    }
}

#[test]
fn invalid_bound_is_logged_on_the_span() {
    let (result, layer) = fraudgraph_test_support::tracing::capture(|| {
        let mut graph = labelled_graph(&[Role::Fraud]);
        let mut rng = SmallRng::seed_from_u64(1);
        augment_collusion(&mut graph, 0, &mut rng)
    });
    assert!(result.is_err());
    assert!(layer.span("core.augment_collusion").is_some());
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == tracing::Level::ERROR)
    );
}
