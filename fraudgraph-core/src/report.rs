//! Read-only summaries of a synthesized graph.

use crate::{
    graph::{Graph, LabelField, NodeId, NodeLabels},
    labels::RoleCounts,
    role::{Role, RoleWeights},
};

/// Achieved role distribution next to the distribution it targeted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistributionSummary {
    /// Per-role node tallies.
    pub counts: RoleCounts,
    /// Target shares, when recorded in the graph metadata.
    pub target: Option<RoleWeights>,
}

impl DistributionSummary {
    /// Achieved percentage of nodes holding `role`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "percentages scale floating-point shares"
    )]
    pub fn percentage(&self, role: Role) -> f64 {
        self.counts.share(role) * 100.0
    }
}

/// One node and its labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeSample {
    /// Node identifier.
    pub id: NodeId,
    /// External name, or the decimal id for generated graphs.
    pub name: String,
    /// Labels, or `None` before role assignment.
    pub labels: Option<NodeLabels>,
}

/// Totals and distributions describing a graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GraphSummary {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Edge count requested at generation time, when known.
    pub target_edges: Option<usize>,
    /// Mean degree `2E / N`; zero for an empty graph.
    pub average_degree: f64,
    /// Ground-truth role distribution.
    pub true_state: DistributionSummary,
    /// Working-hypothesis role distribution.
    pub state: RoleCounts,
    /// The first few nodes in id order.
    pub samples: Vec<NodeSample>,
}

/// Summarises `graph` without modifying it.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Graph, NodeId, summarize};
///
/// let mut graph = Graph::with_node_count(4);
/// graph.add_edge(NodeId::new(0), NodeId::new(1), None)?;
/// let summary = summarize(&graph, 2);
/// assert_eq!(summary.edge_count, 1);
/// assert!((summary.average_degree - 0.5).abs() < 1e-12);
/// assert_eq!(summary.samples.len(), 2);
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[must_use]
pub fn summarize(graph: &Graph, sample_size: usize) -> GraphSummary {
    let samples = graph
        .labelled_nodes()
        .take(sample_size)
        .map(|(id, labels)| NodeSample {
            id,
            name: graph.node_name(id).into_owned(),
            labels: labels.copied(),
        })
        .collect();
    GraphSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        target_edges: graph.metadata().target_edges,
        average_degree: average_degree(graph),
        true_state: DistributionSummary {
            counts: RoleCounts::from_graph(graph, LabelField::TrueState),
            target: graph.metadata().state_distribution,
        },
        state: RoleCounts::from_graph(graph, LabelField::State),
        samples,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "average degree is reported as a float"
)]
fn average_degree(graph: &Graph) -> f64 {
    if graph.node_count() == 0 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / graph.node_count() as f64
}
