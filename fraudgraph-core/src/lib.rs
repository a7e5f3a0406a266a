//! Fraudgraph core library.
//!
//! Synthesizes undirected transaction networks for fraud-detection research:
//! a scale-free topology topped up to a target edge count, ground-truth roles
//! drawn from a target distribution, per-node belief priors, and optional
//! Fraud-to-Accomplice collusion edges.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod codec;
mod collusion;
mod error;
mod graph;
mod labels;
mod render;
mod report;
mod role;
mod synthesizer;
mod topology;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{
        DEFAULT_MAX_ACCOMPLICE_EDGES, DEFAULT_NUM_NODES, DEFAULT_SEED, DEFAULT_TARGET_EDGES,
        SynthesisBuilder,
    },
    codec::GraphCodec,
    collusion::{CollusionReport, RoleIndex, augment_collusion},
    error::{DistributionError, DistributionErrorCode, FraudGraphError, FraudGraphErrorCode, Result},
    graph::{Edge, Graph, GraphMetadata, LabelField, NodeId, NodeLabels},
    labels::{RoleAssignment, RoleCounts, assign_roles},
    render::{ColorMap, DotRenderer, FALLBACK_COLOR, GraphSample, SampleRenderer, node_colors},
    report::{DistributionSummary, GraphSummary, NodeSample, summarize},
    role::{Role, RoleWeights, UnknownRole, WEIGHT_SUM_TOLERANCE},
    synthesizer::{Synthesis, Synthesizer},
    topology::{
        TOP_UP_WEIGHT_MAX, TOP_UP_WEIGHT_MIN, TopologyConfig, TopologyStats, generate_topology,
    },
};
