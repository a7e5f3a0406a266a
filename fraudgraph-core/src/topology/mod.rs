//! Scale-free base topology with uniform random top-up.
//!
//! The generator grows a Barabási–Albert preferential-attachment graph whose
//! attachment parameter is derived from the requested mean degree, then adds
//! uniformly sampled weighted edges until the target edge count is met.

mod barabasi_albert;

use rand::{Rng, seq::index};
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    error::FraudGraphError,
    graph::{Graph, NodeId},
};

use self::barabasi_albert::barabasi_albert;

/// Lower bound of the uniform weight drawn for top-up edges.
pub const TOP_UP_WEIGHT_MIN: f64 = 0.1;
/// Upper bound (inclusive) of the uniform weight drawn for top-up edges.
pub const TOP_UP_WEIGHT_MAX: f64 = 1.0;

/// Size parameters for [`generate_topology`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopologyConfig {
    /// Number of nodes in the generated graph.
    pub num_nodes: usize,
    /// Edge count to top up towards.
    pub target_edges: usize,
}

impl TopologyConfig {
    /// Checks that distinct node pairs can be sampled.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::InvalidNodeCount`] when `num_nodes < 2`.
    pub const fn validate(&self) -> Result<()> {
        if self.num_nodes < 2 {
            return Err(FraudGraphError::InvalidNodeCount {
                got: self.num_nodes,
            });
        }
        Ok(())
    }

    /// Attachment parameter `m = max(1, target_edges / num_nodes)`, capped
    /// at `num_nodes - 1` so the attachment model stays well defined.
    #[must_use]
    pub const fn attachment(&self) -> usize {
        let Some(mean) = self.target_edges.checked_div(self.num_nodes) else {
            return 1;
        };
        let m = if mean > 1 { mean } else { 1 };
        let cap = self.num_nodes.saturating_sub(1);
        if m > cap && cap > 0 { cap } else { m }
    }
}

/// Counters describing how the topology was assembled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopologyStats {
    /// Attachment parameter used by the scale-free stage.
    pub attachment: usize,
    /// Edges produced by preferential attachment.
    pub base_edges: usize,
    /// Weighted edges added by uniform top-up.
    pub top_up_edges: usize,
    /// Sampled pairs discarded because they were already connected.
    pub rejected_samples: u64,
    /// `true` when `target_edges` exceeded the number of distinct pairs and
    /// the graph was filled to completion instead.
    pub saturated: bool,
}

/// Builds the base graph for the synthesis pipeline.
///
/// Node identifiers are `0..num_nodes`. Preferential-attachment edges carry
/// no weight; top-up edges carry a weight drawn uniformly from
/// [`TOP_UP_WEIGHT_MIN`]`..=`[`TOP_UP_WEIGHT_MAX`]. When `target_edges` is
/// larger than `num_nodes * (num_nodes - 1) / 2` the top-up stops at the
/// complete graph and [`TopologyStats::saturated`] is set.
///
/// # Errors
/// Returns [`FraudGraphError::InvalidNodeCount`] when `num_nodes < 2`.
///
/// # Examples
/// ```
/// use fraudgraph_core::{TopologyConfig, generate_topology};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let config = TopologyConfig { num_nodes: 50, target_edges: 120 };
/// let (graph, stats) = generate_topology(config, &mut rng)?;
/// assert_eq!(graph.node_count(), 50);
/// assert_eq!(graph.edge_count(), 120);
/// assert_eq!(stats.attachment, 2);
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[instrument(
    name = "core.generate_topology",
    err,
    skip(config, rng),
    fields(num_nodes = config.num_nodes, target_edges = config.target_edges),
)]
pub fn generate_topology<R>(config: TopologyConfig, rng: &mut R) -> Result<(Graph, TopologyStats)>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let attachment = config.attachment();
    let mut graph = barabasi_albert(config.num_nodes, attachment, rng)?;
    let base_edges = graph.edge_count();
    debug!(attachment, base_edges, "preferential attachment completed");

    let ceiling = config.target_edges.min(graph.max_edge_count());
    let saturated = ceiling < config.target_edges;
    if saturated {
        warn!(
            target_edges = config.target_edges,
            max_edges = ceiling,
            "target edge count exceeds distinct node pairs; filling to completion"
        );
    }

    let rejected_samples = top_up(&mut graph, ceiling, rng)?;
    let top_up_edges = graph.edge_count().saturating_sub(base_edges);

    let metadata = graph.metadata_mut();
    metadata.num_nodes = Some(config.num_nodes);
    metadata.target_edges = Some(config.target_edges);

    #[cfg(feature = "metrics")]
    {
        metrics::counter!("topology_top_up_edges")
            .increment(u64::try_from(top_up_edges).unwrap_or(u64::MAX));
        metrics::counter!("topology_rejected_samples").increment(rejected_samples);
    }

    info!(
        edges = graph.edge_count(),
        base_edges, top_up_edges, rejected_samples, saturated, "topology generated"
    );
    Ok((
        graph,
        TopologyStats {
            attachment,
            base_edges,
            top_up_edges,
            rejected_samples,
            saturated,
        },
    ))
}

/// Adds uniformly sampled weighted edges until `ceiling` edges exist.
/// Returns the number of rejected (already connected) samples.
fn top_up<R>(graph: &mut Graph, ceiling: usize, rng: &mut R) -> Result<u64>
where
    R: Rng + ?Sized,
{
    let node_count = graph.node_count();
    let mut rejected = 0_u64;
    while graph.edge_count() < ceiling {
        let pair = index::sample(rng, node_count, 2);
        let a = NodeId::new(pair.index(0));
        let b = NodeId::new(pair.index(1));
        if graph.contains_edge(a, b) {
            rejected = rejected.saturating_add(1);
            continue;
        }
        let weight = rng.gen_range(TOP_UP_WEIGHT_MIN..=TOP_UP_WEIGHT_MAX);
        graph.add_edge(a, b, Some(weight))?;
    }
    Ok(rejected)
}

#[cfg(test)]
mod tests;
