//! Undirected simple graph carrying role labels and belief vectors.
//!
//! Nodes are addressed by dense identifiers `0..node_count`, optionally paired
//! with external names carried over from an input file. Edges are
//! stored once in canonical `(min, max)` form; a hash set over canonical pairs
//! makes duplicate checks O(1) in either direction.

use std::{borrow::Cow, collections::HashSet};

use crate::{
    Result,
    error::FraudGraphError,
    role::{Role, RoleWeights},
};

/// Dense node identifier.
///
/// # Examples
/// ```
/// use fraudgraph_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five attributes written by role assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeLabels {
    /// Ground-truth role; never changes once written.
    pub true_state: Role,
    /// Working hypothesis, drawn independently of `true_state`.
    pub state: Role,
    /// Initial belief over the three roles.
    pub belief: RoleWeights,
}

impl NodeLabels {
    /// Returns the role stored in `field`.
    #[must_use]
    pub const fn role(&self, field: LabelField) -> Role {
        match field {
            LabelField::TrueState => self.true_state,
            LabelField::State => self.state,
        }
    }
}

/// Selects one of the two role-valued node attributes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LabelField {
    /// The ground-truth `true_state` attribute.
    TrueState,
    /// The working-hypothesis `state` attribute.
    State,
}

impl LabelField {
    /// Attribute name used in interchange files.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::TrueState => "true_state",
            Self::State => "state",
        }
    }
}

/// An undirected edge in canonical form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    weight: Option<f64>,
}

impl Edge {
    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> NodeId { self.source }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> NodeId { self.target }

    /// Returns the edge weight, if any.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> Option<f64> { self.weight }
}

/// Graph-level attributes carried through interchange files.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GraphMetadata {
    /// Node count requested at generation time.
    pub num_nodes: Option<usize>,
    /// Edge count the topology stage topped up towards.
    pub target_edges: Option<usize>,
    /// Belief prior copied onto every node.
    pub initial_belief: Option<RoleWeights>,
    /// Target distribution used to draw `true_state`.
    pub state_distribution: Option<RoleWeights>,
}

/// Undirected simple graph with optional per-node labels.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Graph, NodeId};
///
/// let mut graph = Graph::with_node_count(3);
/// assert!(graph.add_edge(NodeId::new(0), NodeId::new(2), Some(0.5))?);
/// assert!(!graph.add_edge(NodeId::new(2), NodeId::new(0), None)?);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.contains_edge(NodeId::new(2), NodeId::new(0)));
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    labels: Vec<Option<NodeLabels>>,
    adjacency: Vec<Vec<NodeId>>,
    edges: Vec<Edge>,
    edge_lookup: HashSet<(usize, usize)>,
    metadata: GraphMetadata,
    names: Option<Vec<String>>,
}

impl Graph {
    /// Creates a graph with `node_count` unlabelled, isolated nodes.
    #[must_use]
    pub fn with_node_count(node_count: usize) -> Self {
        Self {
            labels: vec![None; node_count],
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
            edge_lookup: HashSet::new(),
            metadata: GraphMetadata::default(),
            names: None,
        }
    }

    /// Number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.labels.len() }

    /// Number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Iterates node identifiers in ascending order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + use<> {
        (0..self.node_count()).map(NodeId::new)
    }

    /// Edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Graph-level metadata.
    #[must_use]
    #[rustfmt::skip]
    pub fn metadata(&self) -> &GraphMetadata { &self.metadata }

    /// Mutable access to graph-level metadata.
    #[rustfmt::skip]
    pub fn metadata_mut(&mut self) -> &mut GraphMetadata { &mut self.metadata }

    /// Maximum number of edges a simple graph of this size can hold.
    #[must_use]
    pub fn max_edge_count(&self) -> usize {
        let n = self.node_count();
        n.saturating_mul(n.saturating_sub(1))
            .checked_div(2)
            .unwrap_or_default()
    }

    /// Returns `true` when an edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_lookup.contains(&canonical(a, b))
    }

    /// Adds an undirected edge unless it already exists.
    ///
    /// Returns `Ok(true)` when the edge was inserted and `Ok(false)` when the
    /// pair was already connected; the existing weight is left untouched.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeOutOfBounds`] for unknown endpoints,
    /// [`FraudGraphError::SelfLoop`] when `a == b`, and
    /// [`FraudGraphError::InvalidWeight`] when the weight is outside `[0, 1]`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Option<f64>) -> Result<bool> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(FraudGraphError::SelfLoop { node: a.get() });
        }
        let (low, high) = canonical(a, b);
        if let Some(value) = weight {
            if !(0.0..=1.0).contains(&value) {
                return Err(FraudGraphError::InvalidWeight {
                    source_node: low,
                    target_node: high,
                    weight: value,
                });
            }
        }
        if !self.edge_lookup.insert((low, high)) {
            return Ok(false);
        }
        self.edges.push(Edge {
            source: NodeId::new(low),
            target: NodeId::new(high),
            weight,
        });
        if let Some(list) = self.adjacency.get_mut(low) {
            list.push(NodeId::new(high));
        }
        if let Some(list) = self.adjacency.get_mut(high) {
            list.push(NodeId::new(low));
        }
        Ok(true)
    }

    /// Neighbours of `node` in edge insertion order.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeOutOfBounds`] for unknown nodes.
    pub fn neighbours(&self, node: NodeId) -> Result<&[NodeId]> {
        self.adjacency
            .get(node.get())
            .map(Vec::as_slice)
            .ok_or_else(|| self.out_of_bounds(node))
    }

    /// Degree of `node`.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeOutOfBounds`] for unknown nodes.
    pub fn degree(&self, node: NodeId) -> Result<usize> {
        self.neighbours(node).map(<[NodeId]>::len)
    }

    /// Labels of `node`, or `None` when roles have not been assigned yet.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeOutOfBounds`] for unknown nodes.
    pub fn labels(&self, node: NodeId) -> Result<Option<&NodeLabels>> {
        self.labels
            .get(node.get())
            .map(Option::as_ref)
            .ok_or_else(|| self.out_of_bounds(node))
    }

    /// Writes the labels of `node`. Labels are write-once.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeOutOfBounds`] for unknown nodes and
    /// [`FraudGraphError::AlreadyLabelled`] when the node already has labels.
    pub fn set_labels(&mut self, node: NodeId, labels: NodeLabels) -> Result<()> {
        let error = self.out_of_bounds(node);
        let slot = self.labels.get_mut(node.get()).ok_or(error)?;
        if slot.is_some() {
            return Err(FraudGraphError::AlreadyLabelled { node: node.get() });
        }
        *slot = Some(labels);
        Ok(())
    }

    /// Iterates `(node, labels)` for every node.
    pub fn labelled_nodes(&self) -> impl Iterator<Item = (NodeId, Option<&NodeLabels>)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, labels)| (NodeId::new(index), labels.as_ref()))
    }

    /// External names indexed by node, when attached.
    #[must_use]
    pub fn node_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Attaches one external name per node, replacing any previous names.
    ///
    /// # Errors
    /// Returns [`FraudGraphError::NodeNameCountMismatch`] when `names` does
    /// not hold exactly one entry per node.
    pub fn set_node_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.node_count() {
            return Err(FraudGraphError::NodeNameCountMismatch {
                expected: self.node_count(),
                got: names.len(),
            });
        }
        self.names = Some(names);
        Ok(())
    }

    /// Name of `node`: its external name if one is attached, otherwise the
    /// decimal index.
    ///
    /// # Examples
    /// ```
    /// use fraudgraph_core::{Graph, NodeId};
    ///
    /// let mut graph = Graph::with_node_count(2);
    /// assert_eq!(graph.node_name(NodeId::new(1)), "1");
    /// graph.set_node_names(vec!["alice".to_owned(), "bob".to_owned()])?;
    /// assert_eq!(graph.node_name(NodeId::new(1)), "bob");
    /// # Ok::<(), fraudgraph_core::FraudGraphError>(())
    /// ```
    #[must_use]
    pub fn node_name(&self, node: NodeId) -> Cow<'_, str> {
        self.names
            .as_ref()
            .and_then(|names| names.get(node.get()))
            .map_or_else(
                || Cow::Owned(node.to_string()),
                |name| Cow::Borrowed(name.as_str()),
            )
    }

    /// Returns `true` when every node carries labels.
    #[must_use]
    pub fn is_fully_labelled(&self) -> bool {
        self.labels.iter().all(Option::is_some)
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node.get() < self.node_count() {
            Ok(())
        } else {
            Err(self.out_of_bounds(node))
        }
    }

    fn out_of_bounds(&self, node: NodeId) -> FraudGraphError {
        FraudGraphError::NodeOutOfBounds {
            node: node.get(),
            node_count: self.node_count(),
        }
    }
}

fn canonical(a: NodeId, b: NodeId) -> (usize, usize) {
    if a <= b {
        (a.get(), b.get())
    } else {
        (b.get(), a.get())
    }
}
