//! Streaming GraphML encoder.

use std::io::{self, Write as _};

use fraudgraph_core::{Graph, GraphMetadata, NodeLabels};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::GraphmlError;
use crate::schema::{
    BELIEF_ACCOMPLICE_KEY, BELIEF_FRAUD_KEY, BELIEF_HONEST_KEY, GRAPHML_NS, INITIAL_BELIEF_KEY,
    KEYS, KeySpec, NUM_NODES_KEY, SCHEMA_LOCATION, STATE_DISTRIBUTION_KEY, STATE_KEY,
    TARGET_EDGES_KEY, TRUE_STATE_KEY, WEIGHT_KEY, XSI_NS,
};

type XmlWriter<'a> = Writer<&'a mut dyn io::Write>;

pub(crate) fn write_document(graph: &Graph, out: &mut dyn io::Write) -> Result<(), GraphmlError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    for key in KEYS {
        writer
            .create_element("key")
            .with_attribute(("id", key.id))
            .with_attribute(("for", key.domain.as_str()))
            .with_attribute(("attr.name", key.name))
            .with_attribute(("attr.type", key.kind))
            .write_empty()?;
    }

    let mut element = BytesStart::new("graph");
    element.push_attribute(("edgedefault", "undirected"));
    writer.write_event(Event::Start(element))?;
    write_metadata(&mut writer, graph.metadata())?;

    for (node, labels) in graph.labelled_nodes() {
        let id = graph.node_name(node);
        match labels {
            Some(assigned) => {
                let mut start = BytesStart::new("node");
                start.push_attribute(("id", id.as_ref()));
                writer.write_event(Event::Start(start))?;
                write_labels(&mut writer, assigned)?;
                writer.write_event(Event::End(BytesEnd::new("node")))?;
            }
            None => {
                writer
                    .create_element("node")
                    .with_attribute(("id", id.as_ref()))
                    .write_empty()?;
            }
        }
    }

    for edge in graph.edges() {
        let source = graph.node_name(edge.source());
        let target = graph.node_name(edge.target());
        let element = writer
            .create_element("edge")
            .with_attribute(("source", source.as_ref()))
            .with_attribute(("target", target.as_ref()));
        match edge.weight() {
            Some(weight) => {
                element.write_inner_content(|inner| {
                    write_data(inner, WEIGHT_KEY, &weight.to_string())
                })?;
            }
            None => {
                element.write_empty()?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_metadata(writer: &mut XmlWriter<'_>, metadata: &GraphMetadata) -> Result<(), GraphmlError> {
    if let Some(num_nodes) = metadata.num_nodes {
        write_data(writer, NUM_NODES_KEY, &num_nodes.to_string())?;
    }
    if let Some(target_edges) = metadata.target_edges {
        write_data(writer, TARGET_EDGES_KEY, &target_edges.to_string())?;
    }
    if let Some(belief) = metadata.initial_belief {
        write_data(writer, INITIAL_BELIEF_KEY, &belief.to_string())?;
    }
    if let Some(distribution) = metadata.state_distribution {
        write_data(writer, STATE_DISTRIBUTION_KEY, &distribution.to_string())?;
    }
    Ok(())
}

fn write_labels(writer: &mut XmlWriter<'_>, labels: &NodeLabels) -> Result<(), GraphmlError> {
    write_data(writer, TRUE_STATE_KEY, labels.true_state.as_str())?;
    write_data(writer, BELIEF_FRAUD_KEY, &labels.belief.fraud.to_string())?;
    write_data(
        writer,
        BELIEF_ACCOMPLICE_KEY,
        &labels.belief.accomplice.to_string(),
    )?;
    write_data(writer, BELIEF_HONEST_KEY, &labels.belief.honest.to_string())?;
    write_data(writer, STATE_KEY, labels.state.as_str())?;
    Ok(())
}

fn write_data(writer: &mut XmlWriter<'_>, key: KeySpec, value: &str) -> quick_xml::Result<()> {
    writer
        .create_element("data")
        .with_attribute(("key", key.id))
        .write_text_content(BytesText::new(value))?;
    Ok(())
}
