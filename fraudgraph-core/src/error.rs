//! Error types for the fraudgraph core library.
//!
//! Defines the configuration, graph and role-weight errors exposed by the
//! public API, stable machine-readable codes for each variant, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::role::Role;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A role-weight mapping failed validation or parsing.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistributionError {
    /// A role had no entry in the mapping.
    #[error("missing weight for role `{role}`")]
    MissingRole {
        /// Role without a weight.
        role: Role,
    },
    /// A role appeared more than once in the mapping.
    #[error("role `{role}` is specified more than once")]
    DuplicateRole {
        /// Role that was repeated.
        role: Role,
    },
    /// A weight was NaN or infinite.
    #[error("weight for role `{role}` must be finite")]
    NonFinite {
        /// Role carrying the invalid weight.
        role: Role,
    },
    /// A weight was below zero.
    #[error("weight for role `{role}` must not be negative (got {value})")]
    Negative {
        /// Role carrying the invalid weight.
        role: Role,
        /// The negative weight.
        value: f64,
    },
    /// The weights did not sum to one within tolerance.
    #[error("weights must sum to 1 (got {sum})")]
    SumMismatch {
        /// Observed sum of all weights.
        sum: f64,
    },
    /// The textual form could not be parsed.
    #[error("malformed role weights `{input}`: {reason}")]
    Malformed {
        /// Raw text that failed to parse.
        input: String,
        /// Human-readable parse failure.
        reason: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`DistributionError`] variants.
    enum DistributionErrorCode for DistributionError {
        /// A role had no entry in the mapping.
        MissingRole => MissingRole { .. } => "DISTRIBUTION_MISSING_ROLE",
        /// A role appeared more than once.
        DuplicateRole => DuplicateRole { .. } => "DISTRIBUTION_DUPLICATE_ROLE",
        /// A weight was NaN or infinite.
        NonFinite => NonFinite { .. } => "DISTRIBUTION_NON_FINITE",
        /// A weight was below zero.
        Negative => Negative { .. } => "DISTRIBUTION_NEGATIVE",
        /// The weights did not sum to one.
        SumMismatch => SumMismatch { .. } => "DISTRIBUTION_SUM_MISMATCH",
        /// The textual form could not be parsed.
        Malformed => Malformed { .. } => "DISTRIBUTION_MALFORMED",
    }
}

/// Error type produced while configuring or running the synthesis pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FraudGraphError {
    /// The topology needs at least two nodes to sample distinct pairs.
    #[error("num_nodes must be at least 2 (got {got})")]
    InvalidNodeCount {
        /// The invalid node count supplied by the caller.
        got: usize,
    },
    /// Collusion augmentation needs a positive sample bound.
    #[error("max_accomplice_edges must be at least 1 (got {got})")]
    InvalidMaxAccompliceEdges {
        /// The invalid bound supplied by the caller.
        got: usize,
    },
    /// A role-weight mapping was rejected.
    #[error("invalid `{parameter}`: {source}")]
    InvalidDistribution {
        /// Name of the configuration parameter that failed validation.
        parameter: &'static str,
        /// Underlying validation failure.
        #[source]
        source: DistributionError,
    },
    /// A node identifier exceeded the graph bounds.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node identifier.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joined a node to itself.
    #[error("self-loop on node {node} is not allowed")]
    SelfLoop {
        /// Node referenced on both ends of the edge.
        node: usize,
    },
    /// An edge carried a weight outside `[0, 1]`.
    #[error("edge ({source_node}, {target_node}) has invalid weight {weight}")]
    InvalidWeight {
        /// Smaller endpoint of the edge.
        source_node: usize,
        /// Larger endpoint of the edge.
        target_node: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// A stage required role labels that have not been assigned.
    #[error("node {node} has no role labels")]
    UnlabelledNode {
        /// Node without labels.
        node: usize,
    },
    /// Labels are write-once and the node already carries them.
    #[error("node {node} is already labelled")]
    AlreadyLabelled {
        /// Node that already carries labels.
        node: usize,
    },
    /// External node names must cover every node exactly once.
    #[error("expected {expected} node names, got {got}")]
    NodeNameCountMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of names supplied.
        got: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`FraudGraphError`] variants.
    enum FraudGraphErrorCode for FraudGraphError {
        /// The topology needs at least two nodes.
        InvalidNodeCount => InvalidNodeCount { .. } => "FRAUDGRAPH_INVALID_NODE_COUNT",
        /// Collusion augmentation needs a positive sample bound.
        InvalidMaxAccompliceEdges => InvalidMaxAccompliceEdges { .. } => "FRAUDGRAPH_INVALID_MAX_ACCOMPLICE_EDGES",
        /// A role-weight mapping was rejected.
        InvalidDistribution => InvalidDistribution { .. } => "FRAUDGRAPH_INVALID_DISTRIBUTION",
        /// A node identifier exceeded the graph bounds.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "FRAUDGRAPH_NODE_OUT_OF_BOUNDS",
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "FRAUDGRAPH_SELF_LOOP",
        /// An edge carried a weight outside `[0, 1]`.
        InvalidWeight => InvalidWeight { .. } => "FRAUDGRAPH_INVALID_WEIGHT",
        /// A stage required role labels that have not been assigned.
        UnlabelledNode => UnlabelledNode { .. } => "FRAUDGRAPH_UNLABELLED_NODE",
        /// The node already carries labels.
        AlreadyLabelled => AlreadyLabelled { .. } => "FRAUDGRAPH_ALREADY_LABELLED",
        /// The node-name list did not match the node count.
        NodeNameCountMismatch => NodeNameCountMismatch { .. } => "FRAUDGRAPH_NODE_NAME_COUNT_MISMATCH",
    }
}

impl FraudGraphError {
    /// Retrieve the inner [`DistributionErrorCode`] when the error came from
    /// role-weight validation.
    #[must_use]
    pub const fn distribution_code(&self) -> Option<DistributionErrorCode> {
        match self {
            Self::InvalidDistribution { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, FraudGraphError>;
