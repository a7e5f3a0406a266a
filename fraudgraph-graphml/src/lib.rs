//! GraphML interchange for fraudgraph networks.
//!
//! Files follow the layout written by common graph tooling: typed `<key>`
//! declarations, an undirected `<graph>`, and `<data>` children carrying node
//! labels, edge weights, and graph-level generation metadata.

mod codec;
mod errors;
mod reader;
mod schema;
mod writer;

pub use codec::{GraphmlCodec, read_graphml_path, write_graphml_path};
pub use errors::GraphmlError;

#[cfg(test)]
mod tests;
