//! Fraud-to-accomplice collusion edges.
//!
//! Augmentation links every Fraud node to a random sample of Accomplice
//! nodes. The role partition is computed once up front through
//! [`RoleIndex`], so the pass over Fraud nodes never rescans the graph.

use rand::{Rng, seq::index};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    error::FraudGraphError,
    graph::{Graph, NodeId},
    role::Role,
};

/// Node identifiers partitioned by `true_state`, each list in id order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoleIndex {
    fraud: Vec<NodeId>,
    accomplice: Vec<NodeId>,
    honest: Vec<NodeId>,
}

impl RoleIndex {
    /// Partitions the nodes of `graph` by ground-truth role.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::UnlabelledNode`] for the first node without
    /// labels.
    pub fn build(graph: &Graph) -> Result<Self> {
        let mut index = Self::default();
        for (node, labels) in graph.labelled_nodes() {
            let role = labels
                .map(|assigned| assigned.true_state)
                .ok_or(FraudGraphError::UnlabelledNode { node: node.get() })?;
            index.bucket_mut(role).push(node);
        }
        Ok(index)
    }

    /// Nodes whose `true_state` is `role`.
    #[must_use]
    pub fn nodes(&self, role: Role) -> &[NodeId] {
        match role {
            Role::Fraud => &self.fraud,
            Role::Accomplice => &self.accomplice,
            Role::Honest => &self.honest,
        }
    }

    const fn bucket_mut(&mut self, role: Role) -> &mut Vec<NodeId> {
        match role {
            Role::Fraud => &mut self.fraud,
            Role::Accomplice => &mut self.accomplice,
            Role::Honest => &mut self.honest,
        }
    }
}

/// Outcome of [`augment_collusion`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollusionReport {
    /// Number of Fraud nodes visited.
    pub fraud_nodes: usize,
    /// Number of Accomplice nodes available for sampling.
    pub accomplice_nodes: usize,
    /// Edges inserted by this pass.
    pub edges_added: usize,
    /// Sampled pairs that were already connected.
    pub already_present: usize,
}

/// Connects each Fraud node to up to `max_accomplice_edges` Accomplice nodes.
///
/// Fraud nodes are visited in id order. For each one, `min(k, accomplices)`
/// distinct Accomplice nodes are sampled and any missing edge is added
/// without a weight. Existing edges are never modified, so running the pass
/// again can only add edges.
///
/// # Errors
/// Returns [`FraudGraphError::InvalidMaxAccompliceEdges`] when
/// `max_accomplice_edges` is zero and [`FraudGraphError::UnlabelledNode`]
/// when any node lacks labels. The graph is untouched in both cases.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Graph, NodeId, NodeLabels, Role, RoleWeights, augment_collusion};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = Graph::with_node_count(3);
/// for (index, role) in [Role::Fraud, Role::Accomplice, Role::Accomplice].into_iter().enumerate() {
///     let labels = NodeLabels { true_state: role, state: role, belief: RoleWeights::uniform() };
///     graph.set_labels(NodeId::new(index), labels)?;
/// }
/// let mut rng = SmallRng::seed_from_u64(42);
/// let report = augment_collusion(&mut graph, 5, &mut rng)?;
/// assert_eq!(report.edges_added, 2);
/// assert_eq!(graph.degree(NodeId::new(0))?, 2);
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[instrument(
    name = "core.augment_collusion",
    err,
    skip(graph, rng),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn augment_collusion<R>(
    graph: &mut Graph,
    max_accomplice_edges: usize,
    rng: &mut R,
) -> Result<CollusionReport>
where
    R: Rng + ?Sized,
{
    if max_accomplice_edges == 0 {
        return Err(FraudGraphError::InvalidMaxAccompliceEdges {
            got: max_accomplice_edges,
        });
    }
    let roles = RoleIndex::build(graph)?;
    let fraud = roles.nodes(Role::Fraud);
    let accomplices = roles.nodes(Role::Accomplice);
    let sample_size = max_accomplice_edges.min(accomplices.len());

    let mut report = CollusionReport {
        fraud_nodes: fraud.len(),
        accomplice_nodes: accomplices.len(),
        ..CollusionReport::default()
    };
    if sample_size == 0 {
        debug!(fraud = fraud.len(), "no accomplices available; nothing to add");
        return Ok(report);
    }

    for &fraud_node in fraud {
        for position in index::sample(rng, accomplices.len(), sample_size) {
            let Some(&accomplice) = accomplices.get(position) else {
                continue;
            };
            if graph.add_edge(fraud_node, accomplice, None)? {
                report.edges_added = report.edges_added.saturating_add(1);
            } else {
                report.already_present = report.already_present.saturating_add(1);
            }
        }
    }

    #[cfg(feature = "metrics")]
    {
        metrics::counter!("collusion_edges_added")
            .increment(u64::try_from(report.edges_added).unwrap_or(u64::MAX));
    }

    info!(
        fraud_nodes = report.fraud_nodes,
        accomplice_nodes = report.accomplice_nodes,
        edges_added = report.edges_added,
        already_present = report.already_present,
        "collusion augmentation completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests;
