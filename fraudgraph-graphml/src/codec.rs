//! [`GraphCodec`] implementation and filesystem helpers.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write as _};
use std::path::Path;

use fraudgraph_core::{Graph, GraphCodec};
use tracing::{info, instrument};

use crate::errors::GraphmlError;
use crate::{reader, writer};

/// Reads and writes GraphML documents.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Graph, GraphCodec, NodeId};
/// use fraudgraph_graphml::GraphmlCodec;
///
/// let mut graph = Graph::with_node_count(2);
/// graph.add_edge(NodeId::new(0), NodeId::new(1), Some(0.25))?;
/// let bytes = GraphmlCodec.to_bytes(&graph)?;
/// assert_eq!(GraphmlCodec.from_bytes(&bytes)?, graph);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphmlCodec;

impl GraphCodec for GraphmlCodec {
    type Error = GraphmlError;

    fn write_graph(&self, graph: &Graph, out: &mut dyn io::Write) -> Result<(), Self::Error> {
        writer::write_document(graph, out)
    }

    fn read_graph(&self, input: &mut dyn io::BufRead) -> Result<Graph, Self::Error> {
        reader::read_document(input)
    }
}

/// Loads a graph from the GraphML file at `path`.
///
/// # Errors
/// Returns [`GraphmlError::Io`] when the file cannot be opened and any
/// decoding error raised by [`GraphmlCodec`].
#[instrument(name = "graphml.read", err, fields(path = %path.as_ref().display()), skip(path))]
pub fn read_graphml_path(path: impl AsRef<Path>) -> Result<Graph, GraphmlError> {
    let file = File::open(path.as_ref())?;
    let graph = GraphmlCodec.read_graph(&mut BufReader::new(file))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Writes `graph` as GraphML to `path`, replacing any existing file.
///
/// # Errors
/// Returns [`GraphmlError::Io`] when the file cannot be created or flushed.
#[instrument(name = "graphml.write", err, fields(path = %path.as_ref().display()), skip(graph, path))]
pub fn write_graphml_path(graph: &Graph, path: impl AsRef<Path>) -> Result<(), GraphmlError> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    GraphmlCodec.write_graph(graph, &mut out)?;
    out.flush()?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph saved"
    );
    Ok(())
}
