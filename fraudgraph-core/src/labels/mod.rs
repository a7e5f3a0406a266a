//! Ground-truth role assignment and belief initialisation.
//!
//! Every node receives a `true_state` drawn from the target distribution, an
//! independent uniformly drawn `state`, and a copy of the belief prior.

use rand::{
    Rng,
    distributions::{Distribution, Standard, WeightedIndex},
};
use tracing::{info, instrument};

use crate::{
    Result,
    error::{DistributionError, FraudGraphError},
    graph::{Graph, LabelField, NodeLabels},
    role::{Role, RoleWeights},
};

/// Per-role node tallies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleCounts {
    fraud: usize,
    accomplice: usize,
    honest: usize,
}

impl RoleCounts {
    /// Tallies `field` over the labelled nodes of `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph, field: LabelField) -> Self {
        let mut counts = Self::default();
        for labels in graph.labelled_nodes().filter_map(|(_, labels)| labels) {
            counts.record(labels.role(field));
        }
        counts
    }

    /// Increments the tally for `role`.
    pub const fn record(&mut self, role: Role) {
        let slot = match role {
            Role::Fraud => &mut self.fraud,
            Role::Accomplice => &mut self.accomplice,
            Role::Honest => &mut self.honest,
        };
        *slot = slot.saturating_add(1);
    }

    /// Number of nodes holding `role`.
    #[must_use]
    pub const fn get(&self, role: Role) -> usize {
        match role {
            Role::Fraud => self.fraud,
            Role::Accomplice => self.accomplice,
            Role::Honest => self.honest,
        }
    }

    /// Number of tallied nodes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.fraud
            .saturating_add(self.accomplice)
            .saturating_add(self.honest)
    }

    /// Fraction of tallied nodes holding `role`; `0.0` when nothing was
    /// tallied.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "shares are reported as floating-point fractions"
    )]
    pub fn share(&self, role: Role) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(role) as f64 / total as f64
    }

    /// Achieved shares for every role.
    #[must_use]
    pub fn shares(&self) -> RoleWeights {
        RoleWeights::new(
            self.share(Role::Fraud),
            self.share(Role::Accomplice),
            self.share(Role::Honest),
        )
    }
}

/// Outcome of [`assign_roles`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleAssignment {
    /// Tallies of the drawn `true_state` values.
    pub counts: RoleCounts,
    /// Distribution the draws targeted.
    pub target: RoleWeights,
}

impl RoleAssignment {
    /// Achieved share of `role` divided by its target share, or `None` when
    /// the target share is zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "ratio of two floating-point shares"
    )]
    pub fn ratio_to_target(&self, role: Role) -> Option<f64> {
        let target = self.target.get(role);
        (target > 0.0).then(|| self.counts.share(role) / target)
    }

    /// Largest absolute gap between an achieved share and its target.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "absolute deviation of floating-point shares"
    )]
    pub fn max_deviation(&self) -> f64 {
        Role::ALL
            .iter()
            .map(|role| (self.counts.share(*role) - self.target.get(*role)).abs())
            .fold(0.0, f64::max)
    }
}

/// Labels every node of `graph`.
///
/// `true_state` is drawn independently per node from `state_distribution`.
/// `state` is drawn uniformly over the three roles and is deliberately
/// unrelated to `true_state`. `belief` is a copy of `initial_belief`. Both
/// weight sets are recorded in the graph metadata.
///
/// # Errors
/// Returns [`FraudGraphError::InvalidDistribution`] when either weight set
/// is not a probability simplex, and [`FraudGraphError::AlreadyLabelled`]
/// when any node already carries labels.
///
/// # Examples
/// ```
/// use fraudgraph_core::{Graph, Role, RoleWeights, assign_roles};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = Graph::with_node_count(10);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let all_fraud = RoleWeights::new(1.0, 0.0, 0.0);
/// let assignment = assign_roles(&mut graph, &all_fraud, &RoleWeights::uniform(), &mut rng)?;
/// assert_eq!(assignment.counts.get(Role::Fraud), 10);
/// assert!(graph.is_fully_labelled());
/// # Ok::<(), fraudgraph_core::FraudGraphError>(())
/// ```
#[instrument(
    name = "core.assign_roles",
    err,
    skip(graph, state_distribution, initial_belief, rng),
    fields(nodes = graph.node_count()),
)]
pub fn assign_roles<R>(
    graph: &mut Graph,
    state_distribution: &RoleWeights,
    initial_belief: &RoleWeights,
    rng: &mut R,
) -> Result<RoleAssignment>
where
    R: Rng + ?Sized,
{
    state_distribution
        .validate()
        .map_err(|source| invalid("state_distribution", source))?;
    initial_belief
        .validate()
        .map_err(|source| invalid("initial_belief", source))?;
    if let Some((node, _)) = graph
        .labelled_nodes()
        .find(|(_, labels)| labels.is_some())
    {
        return Err(FraudGraphError::AlreadyLabelled { node: node.get() });
    }

    let sampler = WeightedIndex::new(state_distribution.as_array()).map_err(|_| {
        invalid(
            "state_distribution",
            DistributionError::SumMismatch {
                sum: state_distribution.sum(),
            },
        )
    })?;

    let mut counts = RoleCounts::default();
    for node in graph.node_ids() {
        let true_state = Role::ALL
            .get(sampler.sample(rng))
            .copied()
            .unwrap_or(Role::Honest);
        let state: Role = Standard.sample(rng);
        graph.set_labels(
            node,
            NodeLabels {
                true_state,
                state,
                belief: *initial_belief,
            },
        )?;
        counts.record(true_state);
    }

    let metadata = graph.metadata_mut();
    metadata.initial_belief = Some(*initial_belief);
    metadata.state_distribution = Some(*state_distribution);

    info!(
        fraud = counts.get(Role::Fraud),
        accomplice = counts.get(Role::Accomplice),
        honest = counts.get(Role::Honest),
        "roles assigned"
    );
    Ok(RoleAssignment {
        counts,
        target: *state_distribution,
    })
}

const fn invalid(parameter: &'static str, source: DistributionError) -> FraudGraphError {
    FraudGraphError::InvalidDistribution { parameter, source }
}
