//! Unit and property tests for topology generation.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::error::FraudGraphError;
use crate::graph::Graph;
use crate::test_utils::suite_proptest_config;

use super::{TOP_UP_WEIGHT_MAX, TOP_UP_WEIGHT_MIN, TopologyConfig, generate_topology};

fn generate(num_nodes: usize, target_edges: usize, seed: u64) -> (Graph, super::TopologyStats) {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate_topology(
        TopologyConfig {
            num_nodes,
            target_edges,
        },
        &mut rng,
    )
    .expect("configuration must be valid")
}

fn assert_simple(graph: &Graph) {
    let mut seen = HashSet::new();
    for edge in graph.edges() {
        assert!(edge.source() < edge.target(), "edge not canonical: {edge:?}");
        assert!(
            seen.insert((edge.source(), edge.target())),
            "duplicate edge {edge:?}"
        );
    }
}

#[rstest]
#[case::zero(0)]
#[case::one(1)]
fn rejects_fewer_than_two_nodes(#[case] num_nodes: usize) {
    let mut rng = SmallRng::seed_from_u64(1);
    let err = generate_topology(
        TopologyConfig {
            num_nodes,
            target_edges: 10,
        },
        &mut rng,
    )
    .expect_err("fewer than two nodes must fail");
    assert_eq!(err, FraudGraphError::InvalidNodeCount { got: num_nodes });
}

#[rstest]
#[case(7000, 30_000, 4)]
#[case(10, 15, 1)]
#[case(5, 3, 1)]
#[case(100, 99, 1)]
#[case(5, 100, 4)]
fn attachment_derives_from_mean_degree(
    #[case] num_nodes: usize,
    #[case] target_edges: usize,
    #[case] expected: usize,
) {
    let config = TopologyConfig {
        num_nodes,
        target_edges,
    };
    assert_eq!(config.attachment(), expected);
}

#[test]
fn tops_up_to_exact_target() {
    let (graph, stats) = generate(10, 15, 42);
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 15);
    assert_eq!(stats.base_edges, 9);
    assert_eq!(stats.top_up_edges, 6);
    assert!(!stats.saturated);
    assert_simple(&graph);
}

#[test]
fn skips_top_up_when_base_exceeds_target() {
    let (graph, stats) = generate(5, 3, 42);
    assert_eq!(stats.base_edges, 4);
    assert_eq!(stats.top_up_edges, 0);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.edges().iter().all(|edge| edge.weight().is_none()));
}

#[rstest]
#[case(5, 100)]
#[case(2, 50)]
#[case(6, 15)]
fn saturates_instead_of_looping_forever(#[case] num_nodes: usize, #[case] target_edges: usize) {
    let (graph, stats) = generate(num_nodes, target_edges, 9);
    assert_eq!(graph.edge_count(), graph.max_edge_count());
    assert_eq!(stats.saturated, target_edges > graph.max_edge_count());
    assert_simple(&graph);
}

#[test]
fn top_up_edges_are_weighted_within_bounds() {
    let (graph, stats) = generate(200, 1_000, 5);
    let weighted: Vec<f64> = graph.edges().iter().filter_map(|edge| edge.weight()).collect();
    assert_eq!(weighted.len(), stats.top_up_edges);
    assert!(
        weighted
            .iter()
            .all(|weight| (TOP_UP_WEIGHT_MIN..=TOP_UP_WEIGHT_MAX).contains(weight))
    );
}

#[test]
fn records_generation_metadata() {
    let (graph, _) = generate(40, 90, 2);
    assert_eq!(graph.metadata().num_nodes, Some(40));
    assert_eq!(graph.metadata().target_edges, Some(90));
}

#[test]
fn same_seed_reproduces_the_graph() {
    let (first, _) = generate(300, 1_200, 42);
    let (second, _) = generate(300, 1_200, 42);
    assert_eq!(first, second);

    let (other, _) = generate(300, 1_200, 43);
    assert_ne!(first.edges(), other.edges());
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn generated_topology_is_simple_and_meets_target(
        num_nodes in 2_usize..120,
        target_edges in 0_usize..600,
        seed in any::<u64>(),
    ) {
        let (graph, stats) = generate(num_nodes, target_edges, seed);
        prop_assert_eq!(graph.node_count(), num_nodes);
        let expected_floor = target_edges.min(graph.max_edge_count());
        prop_assert!(graph.edge_count() >= expected_floor);
        prop_assert_eq!(graph.edge_count(), stats.base_edges + stats.top_up_edges);
        let mut seen = HashSet::new();
        for edge in graph.edges() {
            prop_assert!(edge.source() < edge.target());
            prop_assert!(seen.insert((edge.source(), edge.target())));
        }
    }
}

#[test]
fn generation_is_instrumented() {
    let ((graph, _), layer) =
        fraudgraph_test_support::tracing::capture(|| generate(30, 60, 1));
    let span = layer
        .span("core.generate_topology")
        .expect("topology span recorded");
    assert_eq!(span.fields.get("num_nodes").map(String::as_str), Some("30"));
    let events = layer.events_with_message("topology generated");
    let event = events.first().expect("summary event emitted");
    assert_eq!(
        event.field("edges"),
        Some(graph.edge_count().to_string().as_str())
    );
}
