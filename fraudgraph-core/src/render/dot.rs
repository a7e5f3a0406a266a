//! Graphviz DOT output.

use std::io;

use crate::graph::LabelField;

use super::{ColorMap, GraphSample, SampleRenderer, node_colors};

/// Renders samples as an undirected Graphviz document with filled nodes.
///
/// Nodes are written under their external names, quoted, falling back to
/// the dense index. Layout is left to Graphviz; run `neato` or `sfdp` on the
/// output for a force-directed drawing.
///
/// # Examples
/// ```
/// use fraudgraph_core::{DotRenderer, Graph, GraphSample, LabelField, NodeId, SampleRenderer};
///
/// let mut graph = Graph::with_node_count(2);
/// graph.add_edge(NodeId::new(0), NodeId::new(1), None)?;
/// let sample = GraphSample::first_nodes(&graph, 2)?;
/// let mut out = Vec::new();
/// DotRenderer::new(LabelField::TrueState).render(&sample, &mut out)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.contains("\"0\" -- \"1\";"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DotRenderer {
    field: LabelField,
    colors: ColorMap,
    title: String,
}

impl DotRenderer {
    /// Colours nodes by `field` with the default palette.
    #[must_use]
    pub fn new(field: LabelField) -> Self {
        Self {
            field,
            colors: ColorMap::default(),
            title: format!(
                "Synthetic Network with Roles Based on {} Attribute",
                field.attribute_name()
            ),
        }
    }

    /// Replaces the colour palette.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// Replaces the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Document title.
    #[must_use]
    #[rustfmt::skip]
    pub fn title(&self) -> &str { &self.title }
}

impl SampleRenderer for DotRenderer {
    fn render(&self, sample: &GraphSample, out: &mut dyn io::Write) -> io::Result<()> {
        let title = escape(&self.title);
        writeln!(out, "graph \"{title}\" {{")?;
        writeln!(out, "  label=\"{title}\";")?;
        writeln!(out, "  labelloc=t;")?;
        writeln!(out, "  node [shape=circle, style=filled, fontsize=8, width=0.3];")?;
        let graph = sample.graph();
        let colors = node_colors(graph, self.field, &self.colors);
        for (node, color) in graph.node_ids().zip(colors) {
            let name = escape(&graph.node_name(node));
            writeln!(out, "  \"{name}\" [fillcolor=\"{}\"];", escape(color))?;
        }
        for edge in graph.edges() {
            let source = escape(&graph.node_name(edge.source()));
            let target = escape(&graph.node_name(edge.target()));
            writeln!(out, "  \"{source}\" -- \"{target}\";")?;
        }
        writeln!(out, "}}")
    }
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
