//! Attribute names and `<key>` declarations shared by reader and writer.

pub(crate) const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub(crate) const SCHEMA_LOCATION: &str = "http://graphml.graphdrawing.org/xmlns \
     http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";

pub(crate) const NUM_NODES: &str = "num_nodes";
pub(crate) const TARGET_EDGES: &str = "target_edges";
pub(crate) const INITIAL_BELIEF: &str = "initial_belief";
pub(crate) const STATE_DISTRIBUTION: &str = "state_distribution";

pub(crate) const TRUE_STATE: &str = "true_state";
pub(crate) const STATE: &str = "state";
pub(crate) const BELIEF_FRAUD: &str = "belief_fraud";
pub(crate) const BELIEF_ACCOMPLICE: &str = "belief_accomplice";
pub(crate) const BELIEF_HONEST: &str = "belief_honest";

pub(crate) const WEIGHT: &str = "weight";

/// Node attributes written together by role assignment.
pub(crate) const LABEL_ATTRIBUTES: [&str; 5] = [
    TRUE_STATE,
    BELIEF_FRAUD,
    BELIEF_ACCOMPLICE,
    BELIEF_HONEST,
    STATE,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Domain {
    Graph,
    Node,
    Edge,
}

impl Domain {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct KeySpec {
    pub(crate) id: &'static str,
    pub(crate) domain: Domain,
    pub(crate) name: &'static str,
    pub(crate) kind: &'static str,
}

const fn key(id: &'static str, domain: Domain, name: &'static str, kind: &'static str) -> KeySpec {
    KeySpec {
        id,
        domain,
        name,
        kind,
    }
}

pub(crate) const NUM_NODES_KEY: KeySpec = key("d0", Domain::Graph, NUM_NODES, "long");
pub(crate) const TARGET_EDGES_KEY: KeySpec = key("d1", Domain::Graph, TARGET_EDGES, "long");
pub(crate) const INITIAL_BELIEF_KEY: KeySpec =
    key("d2", Domain::Graph, INITIAL_BELIEF, "string");
pub(crate) const STATE_DISTRIBUTION_KEY: KeySpec =
    key("d3", Domain::Graph, STATE_DISTRIBUTION, "string");
pub(crate) const TRUE_STATE_KEY: KeySpec = key("d4", Domain::Node, TRUE_STATE, "string");
pub(crate) const BELIEF_FRAUD_KEY: KeySpec = key("d5", Domain::Node, BELIEF_FRAUD, "double");
pub(crate) const BELIEF_ACCOMPLICE_KEY: KeySpec =
    key("d6", Domain::Node, BELIEF_ACCOMPLICE, "double");
pub(crate) const BELIEF_HONEST_KEY: KeySpec = key("d7", Domain::Node, BELIEF_HONEST, "double");
pub(crate) const STATE_KEY: KeySpec = key("d8", Domain::Node, STATE, "string");
pub(crate) const WEIGHT_KEY: KeySpec = key("d9", Domain::Edge, WEIGHT, "double");

/// Every key, in declaration order.
pub(crate) const KEYS: [KeySpec; 10] = [
    NUM_NODES_KEY,
    TARGET_EDGES_KEY,
    INITIAL_BELIEF_KEY,
    STATE_DISTRIBUTION_KEY,
    TRUE_STATE_KEY,
    BELIEF_FRAUD_KEY,
    BELIEF_ACCOMPLICE_KEY,
    BELIEF_HONEST_KEY,
    STATE_KEY,
    WEIGHT_KEY,
];
