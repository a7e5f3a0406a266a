//! Colour mapping and sample extraction for visual inspection.
//!
//! Rendering works on a [`GraphSample`], an induced subgraph over the first
//! nodes of a larger graph. Output formats implement [`SampleRenderer`].

mod dot;

use std::io;

use crate::{
    Result,
    graph::{Graph, LabelField, NodeId},
    role::Role,
};

pub use self::dot::DotRenderer;

/// Colour used for nodes without labels when no override is configured.
pub const FALLBACK_COLOR: &str = "gray";

/// Maps roles to colour names understood by the renderer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColorMap {
    fraud: String,
    accomplice: String,
    honest: String,
    fallback: String,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new("red", "orange", "green", FALLBACK_COLOR)
    }
}

impl ColorMap {
    /// Creates a colour map from explicit colour names.
    #[must_use]
    pub fn new(
        fraud: impl Into<String>,
        accomplice: impl Into<String>,
        honest: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            fraud: fraud.into(),
            accomplice: accomplice.into(),
            honest: honest.into(),
            fallback: fallback.into(),
        }
    }

    /// Colour for `role`, or the fallback colour when `role` is `None`.
    #[must_use]
    pub fn color(&self, role: Option<Role>) -> &str {
        match role {
            Some(Role::Fraud) => &self.fraud,
            Some(Role::Accomplice) => &self.accomplice,
            Some(Role::Honest) => &self.honest,
            None => &self.fallback,
        }
    }
}

/// One colour per node of `graph`, in id order, keyed on `field`.
#[must_use]
pub fn node_colors<'a>(graph: &Graph, field: LabelField, colors: &'a ColorMap) -> Vec<&'a str> {
    graph
        .labelled_nodes()
        .map(|(_, labels)| colors.color(labels.map(|assigned| assigned.role(field))))
        .collect()
}

/// Induced subgraph over a prefix of node identifiers.
///
/// Node identifiers and external names are preserved, so node `i` of the
/// sample is node `i` of the source graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSample {
    graph: Graph,
}

impl GraphSample {
    /// Takes the first `size` nodes of `graph` together with every edge
    /// whose endpoints both fall inside the prefix.
    ///
    /// # Errors
    /// Propagates graph construction failures, which indicate a corrupted
    /// source graph.
    pub fn first_nodes(graph: &Graph, size: usize) -> Result<Self> {
        let node_count = size.min(graph.node_count());
        let mut sample = Graph::with_node_count(node_count);
        if let Some(names) = graph.node_names() {
            sample.set_node_names(names.iter().take(node_count).cloned().collect())?;
        }
        for (node, labels) in graph.labelled_nodes().take(node_count) {
            if let Some(assigned) = labels {
                sample.set_labels(node, *assigned)?;
            }
        }
        for edge in graph.edges() {
            if edge.target().get() < node_count {
                sample.add_edge(edge.source(), edge.target(), edge.weight())?;
            }
        }
        Ok(Self { graph: sample })
    }

    /// The sampled subgraph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Role recorded in `field` for `node`, if labelled.
    #[must_use]
    pub fn role(&self, node: NodeId, field: LabelField) -> Option<Role> {
        self.graph
            .labels(node)
            .ok()
            .flatten()
            .map(|labels| labels.role(field))
    }
}

/// Writes a [`GraphSample`] in some visual format.
pub trait SampleRenderer {
    /// Renders `sample` to `out`.
    ///
    /// # Errors
    /// Returns any I/O error raised by `out`.
    fn render(&self, sample: &GraphSample, out: &mut dyn io::Write) -> io::Result<()>;
}
