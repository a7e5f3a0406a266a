//! Barabási–Albert preferential attachment.
//!
//! Seeds a star on `m + 1` nodes (hub `0`), then attaches every later node to
//! `m` distinct targets drawn uniformly from the list of edge endpoints, so a
//! node's chance of being picked is proportional to its degree.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    Result,
    graph::{Graph, NodeId},
};

pub(crate) fn barabasi_albert<R>(node_count: usize, m: usize, rng: &mut R) -> Result<Graph>
where
    R: Rng + ?Sized,
{
    let mut graph = Graph::with_node_count(node_count);
    debug_assert!(m >= 1 && m < node_count);

    // Every edge contributes both endpoints, which is what biases sampling
    // towards high-degree nodes.
    let mut endpoints: Vec<usize> = Vec::with_capacity(node_count.saturating_mul(m) * 2);
    for leaf in 1..=m {
        graph.add_edge(NodeId::new(0), NodeId::new(leaf), None)?;
        endpoints.push(0);
        endpoints.push(leaf);
    }

    let mut targets = Vec::with_capacity(m);
    let mut chosen = HashSet::with_capacity(m);
    for source in (m + 1)..node_count {
        targets.clear();
        chosen.clear();
        while targets.len() < m {
            let Some(&pick) = endpoints.choose(rng) else {
                break;
            };
            if chosen.insert(pick) {
                targets.push(pick);
            }
        }
        for &target in &targets {
            graph.add_edge(NodeId::new(source), NodeId::new(target), None)?;
        }
        endpoints.extend_from_slice(&targets);
        endpoints.extend(std::iter::repeat_n(source, m));
    }
    Ok(graph)
}
