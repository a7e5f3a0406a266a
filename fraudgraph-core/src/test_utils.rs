//! Shared test utilities for `fraudgraph-core`.

use fraudgraph_test_support::proptest_profile::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    graph::{Graph, NodeId, NodeLabels},
    role::{Role, RoleWeights},
};

/// Builds a proptest configuration from the shared environment profile so
/// every property suite honours `FRAUDGRAPH_PBT_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::from_env(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Builds an edgeless graph whose `true_state` labels follow `roles`.
pub(crate) fn labelled_graph(roles: &[Role]) -> Graph {
    let mut graph = Graph::with_node_count(roles.len());
    for (index, role) in roles.iter().enumerate() {
        graph
            .set_labels(
                NodeId::new(index),
                NodeLabels {
                    true_state: *role,
                    state: Role::Honest,
                    belief: RoleWeights::uniform(),
                },
            )
            .expect("fresh node accepts labels");
    }
    graph
}
