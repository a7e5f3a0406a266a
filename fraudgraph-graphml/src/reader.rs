//! GraphML decoder.
//!
//! Parsing happens in two passes: the XML stream is first collected into raw
//! key, node, and edge records, which are then resolved into a [`Graph`].
//! Node ids are mapped to dense identifiers in order of appearance and kept
//! as node names unless they already read `0..n`. Directed graphs are
//! rejected.

use std::collections::HashMap;
use std::io;
use std::str::FromStr;

use fraudgraph_core::{Graph, NodeId, NodeLabels, Role, RoleWeights};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::errors::GraphmlError;
use crate::schema::{
    BELIEF_ACCOMPLICE, BELIEF_FRAUD, BELIEF_HONEST, INITIAL_BELIEF, LABEL_ATTRIBUTES, NUM_NODES,
    STATE, STATE_DISTRIBUTION, TARGET_EDGES, TRUE_STATE, WEIGHT,
};

type Data = Vec<(String, String)>;

#[derive(Default)]
struct RawNode {
    id: String,
    data: Data,
}

#[derive(Default)]
struct RawEdge {
    source: String,
    target: String,
    data: Data,
}

#[derive(Clone, Copy)]
enum Scope {
    Graph,
    Node,
    Edge,
}

#[derive(Default)]
struct RawDocument {
    keys: HashMap<String, String>,
    saw_graph: bool,
    graph_data: Data,
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl RawDocument {
    fn data_mut(&mut self, scope: Scope) -> Option<&mut Data> {
        match scope {
            Scope::Graph => Some(&mut self.graph_data),
            Scope::Node => self.nodes.last_mut().map(|node| &mut node.data),
            Scope::Edge => self.edges.last_mut().map(|edge| &mut edge.data),
        }
    }
}

pub(crate) fn read_document(input: &mut dyn io::BufRead) -> Result<Graph, GraphmlError> {
    let raw = collect(input)?;
    if !raw.saw_graph {
        return Err(GraphmlError::MissingGraph);
    }
    debug!(
        nodes = raw.nodes.len(),
        edges = raw.edges.len(),
        "graphml document parsed"
    );
    build(raw)
}

fn collect(input: &mut dyn io::BufRead) -> Result<RawDocument, GraphmlError> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut raw = RawDocument::default();
    let mut scope = Scope::Graph;
    let mut pending: Option<(String, String)> = None;
    let mut buffer = Vec::new();
    loop {
        match reader.read_event_into(&mut buffer)? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"graph" => open_graph(&mut raw, &element)?,
                b"node" => {
                    raw.nodes.push(node_record(&element)?);
                    scope = Scope::Node;
                }
                b"edge" => {
                    raw.edges.push(edge_record(&element)?);
                    scope = Scope::Edge;
                }
                b"key" => declare_key(&mut raw, &element)?,
                b"data" => pending = Some((required(&element, "data", "key")?, String::new())),
                _ => {}
            },
            Event::Empty(element) => match element.local_name().as_ref() {
                b"node" => raw.nodes.push(node_record(&element)?),
                b"edge" => raw.edges.push(edge_record(&element)?),
                b"key" => declare_key(&mut raw, &element)?,
                b"data" => {
                    let key = required(&element, "data", "key")?;
                    if let Some(data) = raw.data_mut(scope) {
                        data.push((key, String::new()));
                    }
                }
                b"graph" => open_graph(&mut raw, &element)?,
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, value)) = pending.as_mut() {
                    value.push_str(&text.unescape()?);
                }
            }
            Event::CData(text) => {
                if let Some((_, value)) = pending.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::End(element) => match element.local_name().as_ref() {
                b"data" => {
                    if let (Some(entry), Some(data)) = (pending.take(), raw.data_mut(scope)) {
                        data.push(entry);
                    }
                }
                b"node" | b"edge" => scope = Scope::Graph,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buffer.clear();
    }
    Ok(raw)
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, GraphmlError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() && attr.key.prefix().is_none() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required(
    element: &BytesStart<'_>,
    element_name: &'static str,
    name: &'static str,
) -> Result<String, GraphmlError> {
    attribute(element, name)?.ok_or(GraphmlError::MissingAttribute {
        element: element_name,
        attribute: name,
    })
}

fn open_graph(raw: &mut RawDocument, element: &BytesStart<'_>) -> Result<(), GraphmlError> {
    if let Some(edgedefault) = attribute(element, "edgedefault")?
        && edgedefault != "undirected"
    {
        return Err(GraphmlError::DirectedGraph { edgedefault });
    }
    raw.saw_graph = true;
    Ok(())
}

fn node_record(element: &BytesStart<'_>) -> Result<RawNode, GraphmlError> {
    Ok(RawNode {
        id: required(element, "node", "id")?,
        data: Data::new(),
    })
}

fn edge_record(element: &BytesStart<'_>) -> Result<RawEdge, GraphmlError> {
    Ok(RawEdge {
        source: required(element, "edge", "source")?,
        target: required(element, "edge", "target")?,
        data: Data::new(),
    })
}

fn declare_key(raw: &mut RawDocument, element: &BytesStart<'_>) -> Result<(), GraphmlError> {
    let id = required(element, "key", "id")?;
    let name = attribute(element, "attr.name")?.unwrap_or_else(|| id.clone());
    raw.keys.insert(id, name);
    Ok(())
}

fn build(raw: RawDocument) -> Result<Graph, GraphmlError> {
    let mut ids: HashMap<&str, NodeId> = HashMap::with_capacity(raw.nodes.len());
    for (index, node) in raw.nodes.iter().enumerate() {
        if ids.insert(node.id.as_str(), NodeId::new(index)).is_some() {
            return Err(GraphmlError::DuplicateNode {
                node: node.id.clone(),
            });
        }
    }

    let mut graph = Graph::with_node_count(raw.nodes.len());
    let dense = raw
        .nodes
        .iter()
        .enumerate()
        .all(|(index, node)| node.id == index.to_string());
    if !dense {
        graph.set_node_names(raw.nodes.iter().map(|node| node.id.clone()).collect())?;
    }
    apply_metadata(&mut graph, &named(&raw.keys, &raw.graph_data)?)?;

    for (index, node) in raw.nodes.iter().enumerate() {
        let attributes = named(&raw.keys, &node.data)?;
        if let Some(labels) = node_labels(&node.id, &attributes)? {
            graph.set_labels(NodeId::new(index), labels)?;
        }
    }

    for edge in &raw.edges {
        let lookup = |node: &String| {
            ids.get(node.as_str())
                .copied()
                .ok_or_else(|| GraphmlError::UnknownNode { node: node.clone() })
        };
        let source = lookup(&edge.source)?;
        let target = lookup(&edge.target)?;
        let attributes = named(&raw.keys, &edge.data)?;
        let weight = attributes
            .get(WEIGHT)
            .map(|value| parse_value::<f64>(WEIGHT, value))
            .transpose()?;
        if !graph.add_edge(source, target, weight)? {
            return Err(GraphmlError::DuplicateEdge {
                source_node: edge.source.clone(),
                target_node: edge.target.clone(),
            });
        }
    }
    Ok(graph)
}

/// Resolves `<data key=..>` entries to attribute names.
fn named<'a>(
    keys: &'a HashMap<String, String>,
    data: &'a Data,
) -> Result<HashMap<&'a str, &'a str>, GraphmlError> {
    data.iter()
        .map(|(key, value)| {
            keys.get(key)
                .map(|name| (name.as_str(), value.as_str()))
                .ok_or_else(|| GraphmlError::UnknownKey { key: key.clone() })
        })
        .collect()
}

fn apply_metadata(graph: &mut Graph, attributes: &HashMap<&str, &str>) -> Result<(), GraphmlError> {
    let metadata = graph.metadata_mut();
    metadata.num_nodes = attributes
        .get(NUM_NODES)
        .map(|value| parse_value::<usize>(NUM_NODES, value))
        .transpose()?;
    metadata.target_edges = attributes
        .get(TARGET_EDGES)
        .map(|value| parse_value::<usize>(TARGET_EDGES, value))
        .transpose()?;
    metadata.initial_belief = attributes
        .get(INITIAL_BELIEF)
        .map(|value| parse_weights(INITIAL_BELIEF, value))
        .transpose()?;
    metadata.state_distribution = attributes
        .get(STATE_DISTRIBUTION)
        .map(|value| parse_weights(STATE_DISTRIBUTION, value))
        .transpose()?;
    Ok(())
}

/// Labels are all-or-nothing: a node with none of the label attributes is
/// unlabelled, a node with only some of them is malformed.
fn node_labels(
    node: &str,
    attributes: &HashMap<&str, &str>,
) -> Result<Option<NodeLabels>, GraphmlError> {
    if !LABEL_ATTRIBUTES
        .iter()
        .any(|name| attributes.contains_key(name))
    {
        return Ok(None);
    }
    let get = |name: &'static str| {
        attributes
            .get(name)
            .copied()
            .ok_or_else(|| GraphmlError::MissingNodeAttribute {
                node: node.to_owned(),
                attribute: name,
            })
    };
    Ok(Some(NodeLabels {
        true_state: parse_value::<Role>(TRUE_STATE, get(TRUE_STATE)?)?,
        state: parse_value::<Role>(STATE, get(STATE)?)?,
        belief: RoleWeights::new(
            parse_value::<f64>(BELIEF_FRAUD, get(BELIEF_FRAUD)?)?,
            parse_value::<f64>(BELIEF_ACCOMPLICE, get(BELIEF_ACCOMPLICE)?)?,
            parse_value::<f64>(BELIEF_HONEST, get(BELIEF_HONEST)?)?,
        ),
    }))
}

fn parse_value<T>(attribute: &str, value: &str) -> Result<T, GraphmlError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|error| GraphmlError::InvalidValue {
            attribute: attribute.to_owned(),
            value: value.to_owned(),
            reason: error.to_string(),
        })
}

fn parse_weights(attribute: &'static str, value: &str) -> Result<RoleWeights, GraphmlError> {
    value
        .parse::<RoleWeights>()
        .map_err(|source| GraphmlError::InvalidWeights { attribute, source })
}
