//! Persistence seam for graphs.
//!
//! Concrete interchange formats live in their own crates and implement
//! [`GraphCodec`]; the core never touches the filesystem.

use std::io;

use crate::graph::Graph;

/// Encodes graphs to and decodes graphs from a byte stream.
///
/// Implementations must preserve node labels, edge weights, and graph
/// metadata so that a decoded graph compares equal to the encoded one.
pub trait GraphCodec {
    /// Failure type raised while encoding or decoding.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes `graph` to `out`.
    ///
    /// # Errors
    /// Returns the codec's error when the graph cannot be encoded or the
    /// writer fails.
    fn write_graph(&self, graph: &Graph, out: &mut dyn io::Write) -> Result<(), Self::Error>;

    /// Reads a graph from `input`.
    ///
    /// # Errors
    /// Returns the codec's error when the input is malformed or describes an
    /// invalid graph.
    fn read_graph(&self, input: &mut dyn io::BufRead) -> Result<Graph, Self::Error>;

    /// Encodes `graph` into an owned buffer.
    ///
    /// # Errors
    /// Propagates [`GraphCodec::write_graph`] failures.
    fn to_bytes(&self, graph: &Graph) -> Result<Vec<u8>, Self::Error> {
        let mut buffer = Vec::new();
        self.write_graph(graph, &mut buffer)?;
        Ok(buffer)
    }

    /// Decodes a graph from `bytes`.
    ///
    /// # Errors
    /// Propagates [`GraphCodec::read_graph`] failures.
    fn from_bytes(&self, bytes: &[u8]) -> Result<Graph, Self::Error> {
        let mut reader = bytes;
        self.read_graph(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{BufRead, Write};

    use crate::graph::NodeId;

    /// Whitespace edge list: the node count, then one `a b` pair per line.
    struct EdgeList;

    #[derive(Debug, thiserror::Error)]
    enum EdgeListError {
        #[error(transparent)]
        Io(#[from] io::Error),
        #[error("malformed line `{0}`")]
        Malformed(String),
        #[error(transparent)]
        Graph(#[from] crate::FraudGraphError),
    }

    impl GraphCodec for EdgeList {
        type Error = EdgeListError;

        fn write_graph(&self, graph: &Graph, out: &mut dyn io::Write) -> Result<(), Self::Error> {
            writeln!(out, "{}", graph.node_count())?;
            for edge in graph.edges() {
                writeln!(out, "{} {}", edge.source(), edge.target())?;
            }
            Ok(())
        }

        fn read_graph(&self, input: &mut dyn io::BufRead) -> Result<Graph, Self::Error> {
            let mut lines = input.lines();
            let header = lines.next().transpose()?.unwrap_or_default();
            let count = header
                .trim()
                .parse()
                .map_err(|_| EdgeListError::Malformed(header.clone()))?;
            let mut graph = Graph::with_node_count(count);
            for line in lines {
                let text = line?;
                let parsed: Option<(usize, usize)> = text
                    .split_once(' ')
                    .and_then(|(a, b)| Some((a.parse().ok()?, b.parse().ok()?)));
                let (a, b) = parsed.ok_or_else(|| EdgeListError::Malformed(text.clone()))?;
                graph.add_edge(NodeId::new(a), NodeId::new(b), None)?;
            }
            Ok(graph)
        }
    }

    #[test]
    fn provided_byte_helpers_delegate_to_stream_methods() {
        let mut graph = Graph::with_node_count(3);
        graph
            .add_edge(NodeId::new(0), NodeId::new(2), None)
            .expect("valid edge");
        let bytes = EdgeList.to_bytes(&graph).expect("encode");
        assert_eq!(bytes, b"3\n0 2\n");
        let decoded = EdgeList.from_bytes(&bytes).expect("decode");
        assert_eq!(decoded, graph);
    }

    #[test]
    fn decoding_surfaces_graph_errors() {
        let err = EdgeList.from_bytes(b"2\n1 1\n").expect_err("self-loop");
        assert!(matches!(
            err,
            EdgeListError::Graph(crate::FraudGraphError::SelfLoop { node: 1 })
        ));
    }

    #[test]
    fn readers_accept_any_buffered_source() {
        let mut cursor = io::Cursor::new(b"2\n0 1\n".to_vec());
        let graph = EdgeList.read_graph(&mut cursor).expect("decode");
        assert!(cursor.fill_buf().expect("drained").is_empty());
        assert_eq!(graph.edge_count(), 1);
        let mut sink = Vec::new();
        EdgeList.write_graph(&graph, &mut sink).expect("encode");
        sink.flush().expect("flush");
        assert_eq!(sink, b"2\n0 1\n");
    }
}
