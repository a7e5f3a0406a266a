//! Pipeline orchestration for fraud-network synthesis.
//!
//! [`Synthesizer`] runs topology generation followed by role assignment on a
//! single RNG stream, and exposes collusion augmentation as a separate step
//! so it can be applied to graphs loaded from disk.

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::{
    Result,
    collusion::{CollusionReport, augment_collusion},
    graph::Graph,
    labels::{RoleAssignment, assign_roles},
    role::RoleWeights,
    topology::{TopologyConfig, TopologyStats, generate_topology},
};

/// A generated graph together with the statistics of each stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    /// The labelled graph.
    pub graph: Graph,
    /// How the topology stage assembled the edges.
    pub topology: TopologyStats,
    /// Ground-truth role tallies and their target.
    pub assignment: RoleAssignment,
}

/// Entry point for running the synthesis pipeline.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Role, SynthesisBuilder};
///
/// let synthesizer = SynthesisBuilder::new()
///     .with_num_nodes(200)
///     .with_target_edges(600)
///     .build()
///     .expect("builder must succeed");
/// let synthesis = synthesizer.generate()?;
/// assert_eq!(synthesis.graph.node_count(), 200);
/// assert!(synthesis.graph.edge_count() >= 600);
/// assert!(synthesis.graph.is_fully_labelled());
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Synthesizer {
    topology: TopologyConfig,
    state_distribution: RoleWeights,
    initial_belief: RoleWeights,
    max_accomplice_edges: NonZeroUsize,
    seed: u64,
}

impl Synthesizer {
    pub(crate) const fn new(
        topology: TopologyConfig,
        state_distribution: RoleWeights,
        initial_belief: RoleWeights,
        max_accomplice_edges: NonZeroUsize,
        seed: u64,
    ) -> Self {
        Self {
            topology,
            state_distribution,
            initial_belief,
            max_accomplice_edges,
            seed,
        }
    }

    /// Size parameters handed to the topology stage.
    #[must_use]
    #[rustfmt::skip]
    pub const fn topology(&self) -> TopologyConfig { self.topology }

    /// Target distribution of ground-truth roles.
    #[must_use]
    #[rustfmt::skip]
    pub const fn state_distribution(&self) -> RoleWeights { self.state_distribution }

    /// Belief prior copied onto every node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn initial_belief(&self) -> RoleWeights { self.initial_belief }

    /// Accomplices sampled per Fraud node during augmentation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_accomplice_edges(&self) -> NonZeroUsize { self.max_accomplice_edges }

    /// Seed used by [`Synthesizer::generate`] and [`Synthesizer::rng`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn seed(&self) -> u64 { self.seed }

    /// A fresh RNG seeded from the configured seed.
    #[must_use]
    pub fn rng(&self) -> SmallRng {
        SmallRng::seed_from_u64(self.seed)
    }

    /// Generates a labelled graph from the configured seed.
    ///
    /// Two calls on the same synthesizer produce identical graphs.
    ///
    /// # Errors
    /// Propagates topology and role-assignment failures.
    pub fn generate(&self) -> Result<Synthesis> {
        self.generate_with_rng(&mut self.rng())
    }

    /// Generates a labelled graph drawing all randomness from `rng`.
    ///
    /// # Errors
    /// Propagates topology and role-assignment failures.
    #[instrument(
        name = "core.generate",
        err,
        skip(self, rng),
        fields(
            num_nodes = self.topology.num_nodes,
            target_edges = self.topology.target_edges,
        ),
    )]
    pub fn generate_with_rng<R>(&self, rng: &mut R) -> Result<Synthesis>
    where
        R: Rng + ?Sized,
    {
        let (mut graph, topology) = generate_topology(self.topology, rng)?;
        let assignment = assign_roles(
            &mut graph,
            &self.state_distribution,
            &self.initial_belief,
            rng,
        )?;
        Ok(Synthesis {
            graph,
            topology,
            assignment,
        })
    }

    /// Adds collusion edges to a labelled `graph`.
    ///
    /// # Errors
    /// Returns [`crate::FraudGraphError::UnlabelledNode`] when `graph` has
    /// not been through role assignment.
    pub fn augment<R>(&self, graph: &mut Graph, rng: &mut R) -> Result<CollusionReport>
    where
        R: Rng + ?Sized,
    {
        augment_collusion(graph, self.max_accomplice_edges.get(), rng)
    }
}
