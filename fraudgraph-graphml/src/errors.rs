use fraudgraph_core::{DistributionError, FraudGraphError};
use thiserror::Error;

/// Failure while reading or writing GraphML.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphmlError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document contains no <graph> element")]
    MissingGraph,
    #[error("unsupported edgedefault `{edgedefault}`; only undirected graphs can be read")]
    DirectedGraph { edgedefault: String },
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("<data> references undeclared key `{key}`")]
    UnknownKey { key: String },
    #[error("node `{node}` is missing attribute `{attribute}`")]
    MissingNodeAttribute { node: String, attribute: &'static str },
    #[error("invalid value `{value}` for `{attribute}`: {reason}")]
    InvalidValue {
        attribute: String,
        value: String,
        reason: String,
    },
    #[error("invalid role weights in `{attribute}`: {source}")]
    InvalidWeights {
        attribute: &'static str,
        #[source]
        source: DistributionError,
    },
    #[error("node id `{node}` is declared more than once")]
    DuplicateNode { node: String },
    #[error("edge references unknown node `{node}`")]
    UnknownNode { node: String },
    #[error("edge between `{source_node}` and `{target_node}` is declared more than once")]
    DuplicateEdge {
        source_node: String,
        target_node: String,
    },
    #[error(transparent)]
    Graph(#[from] FraudGraphError),
}

impl From<quick_xml::events::attributes::AttrError> for GraphmlError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(error.into())
    }
}
