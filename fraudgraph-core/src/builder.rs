//! Builder for configuring the synthesis pipeline.
//!
//! Collects every pipeline parameter with its default and validates the whole
//! configuration before any graph is generated.

use std::num::NonZeroUsize;

use crate::{
    Result,
    error::FraudGraphError,
    role::RoleWeights,
    synthesizer::Synthesizer,
    topology::TopologyConfig,
};

/// Default number of nodes.
pub const DEFAULT_NUM_NODES: usize = 7_000;
/// Default edge count targeted by the topology stage.
pub const DEFAULT_TARGET_EDGES: usize = 30_000;
/// Default seed for the pipeline RNG.
pub const DEFAULT_SEED: u64 = 42;
/// Default number of accomplices sampled per Fraud node.
pub const DEFAULT_MAX_ACCOMPLICE_EDGES: usize = 5;

/// Configures and constructs [`Synthesizer`] instances.
///
/// # Examples
/// ```
/// use fraudgraph_core::{RoleWeights, SynthesisBuilder};
///
/// let synthesizer = SynthesisBuilder::new()
///     .with_num_nodes(500)
///     .with_target_edges(1_500)
///     .with_state_distribution(RoleWeights::new(0.2, 0.3, 0.5))
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(synthesizer.topology().num_nodes, 500);
/// assert_eq!(synthesizer.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct SynthesisBuilder {
    num_nodes: usize,
    target_edges: usize,
    initial_belief: RoleWeights,
    state_distribution: RoleWeights,
    max_accomplice_edges: usize,
    seed: u64,
}

impl Default for SynthesisBuilder {
    fn default() -> Self {
        Self {
            num_nodes: DEFAULT_NUM_NODES,
            target_edges: DEFAULT_TARGET_EDGES,
            initial_belief: RoleWeights::uniform(),
            state_distribution: RoleWeights::default_state_distribution(),
            max_accomplice_edges: DEFAULT_MAX_ACCOMPLICE_EDGES,
            seed: DEFAULT_SEED,
        }
    }
}

impl SynthesisBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use fraudgraph_core::SynthesisBuilder;
    ///
    /// let builder = SynthesisBuilder::new();
    /// assert_eq!(builder.num_nodes(), 7_000);
    /// assert_eq!(builder.target_edges(), 30_000);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the node count.
    #[must_use]
    pub const fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    #[rustfmt::skip]
    pub const fn num_nodes(&self) -> usize { self.num_nodes }

    /// Overrides the target edge count.
    #[must_use]
    pub const fn with_target_edges(mut self, target_edges: usize) -> Self {
        self.target_edges = target_edges;
        self
    }

    /// Returns the configured target edge count.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target_edges(&self) -> usize { self.target_edges }

    /// Overrides the belief prior copied onto every node.
    #[must_use]
    pub const fn with_initial_belief(mut self, initial_belief: RoleWeights) -> Self {
        self.initial_belief = initial_belief;
        self
    }

    /// Returns the configured belief prior.
    #[must_use]
    #[rustfmt::skip]
    pub const fn initial_belief(&self) -> RoleWeights { self.initial_belief }

    /// Overrides the ground-truth role distribution.
    #[must_use]
    pub const fn with_state_distribution(mut self, state_distribution: RoleWeights) -> Self {
        self.state_distribution = state_distribution;
        self
    }

    /// Returns the configured ground-truth role distribution.
    #[must_use]
    #[rustfmt::skip]
    pub const fn state_distribution(&self) -> RoleWeights { self.state_distribution }

    /// Overrides the number of accomplices sampled per Fraud node.
    ///
    /// # Examples
    /// ```
    /// use fraudgraph_core::{FraudGraphError, SynthesisBuilder};
    ///
    /// let err = SynthesisBuilder::new()
    ///     .with_max_accomplice_edges(0)
    ///     .build()
    ///     .expect_err("zero accomplices per fraud node is rejected");
    /// assert_eq!(err, FraudGraphError::InvalidMaxAccompliceEdges { got: 0 });
    /// ```
    #[must_use]
    pub const fn with_max_accomplice_edges(mut self, max_accomplice_edges: usize) -> Self {
        self.max_accomplice_edges = max_accomplice_edges;
        self
    }

    /// Returns the configured accomplice sample bound.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_accomplice_edges(&self) -> usize { self.max_accomplice_edges }

    /// Overrides the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured RNG seed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn seed(&self) -> u64 { self.seed }

    /// Validates the configuration and constructs a [`Synthesizer`].
    ///
    /// # Errors
    /// Returns [`FraudGraphError::InvalidNodeCount`] when fewer than two
    /// nodes are requested, [`FraudGraphError::InvalidMaxAccompliceEdges`]
    /// when the accomplice bound is zero, and
    /// [`FraudGraphError::InvalidDistribution`] when either weight set is not
    /// a probability simplex.
    pub fn build(self) -> Result<Synthesizer> {
        let topology = TopologyConfig {
            num_nodes: self.num_nodes,
            target_edges: self.target_edges,
        };
        topology.validate()?;
        let max_accomplice_edges = NonZeroUsize::new(self.max_accomplice_edges).ok_or(
            FraudGraphError::InvalidMaxAccompliceEdges {
                got: self.max_accomplice_edges,
            },
        )?;
        self.state_distribution.validate().map_err(|source| {
            FraudGraphError::InvalidDistribution {
                parameter: "state_distribution",
                source,
            }
        })?;
        self.initial_belief
            .validate()
            .map_err(|source| FraudGraphError::InvalidDistribution {
                parameter: "initial_belief",
                source,
            })?;

        Ok(Synthesizer::new(
            topology,
            self.state_distribution,
            self.initial_belief,
            max_accomplice_edges,
            self.seed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::error::DistributionErrorCode;

    #[test]
    fn defaults_match_documented_values() {
        let builder = SynthesisBuilder::new();
        assert_eq!(builder.num_nodes(), DEFAULT_NUM_NODES);
        assert_eq!(builder.target_edges(), DEFAULT_TARGET_EDGES);
        assert_eq!(builder.initial_belief(), RoleWeights::uniform());
        assert_eq!(
            builder.state_distribution(),
            RoleWeights::new(0.1, 0.2, 0.7)
        );
        assert_eq!(builder.max_accomplice_edges(), 5);
        assert_eq!(builder.seed(), 42);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    fn rejects_degenerate_node_counts(#[case] num_nodes: usize) {
        let err = SynthesisBuilder::new()
            .with_num_nodes(num_nodes)
            .build()
            .expect_err("too few nodes");
        assert_eq!(err, FraudGraphError::InvalidNodeCount { got: num_nodes });
    }

    #[rstest]
    #[case::state(
        SynthesisBuilder::new().with_state_distribution(RoleWeights::new(0.1, 0.2, 0.3)),
        "state_distribution",
        DistributionErrorCode::SumMismatch
    )]
    #[case::belief(
        SynthesisBuilder::new().with_initial_belief(RoleWeights::new(f64::INFINITY, 0.0, 0.0)),
        "initial_belief",
        DistributionErrorCode::NonFinite
    )]
    fn rejects_invalid_weights(
        #[case] builder: SynthesisBuilder,
        #[case] expected_parameter: &str,
        #[case] expected_code: DistributionErrorCode,
    ) {
        let err = builder.build().expect_err("invalid weights");
        assert_eq!(err.distribution_code(), Some(expected_code));
        assert!(matches!(
            err,
            FraudGraphError::InvalidDistribution { parameter, .. } if parameter == expected_parameter
        ));
    }

    #[test]
    fn build_carries_configuration() {
        let synthesizer = SynthesisBuilder::new()
            .with_num_nodes(20)
            .with_target_edges(40)
            .with_max_accomplice_edges(2)
            .with_seed(9)
            .build()
            .expect("valid configuration");
        assert_eq!(synthesizer.topology().target_edges, 40);
        assert_eq!(synthesizer.max_accomplice_edges().get(), 2);
        assert_eq!(synthesizer.seed(), 9);
    }
}
