//! Role assignment benchmarks.
//!
//! Labels a fresh copy of a pre-built topology on every iteration so only
//! the sampling and label writes are measured.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use fraudgraph_benches::{network, params::NetworkBenchParams};
use fraudgraph_core::{RoleWeights, assign_roles};

/// Seed used for topology generation and role sampling.
const SEED: u64 = 42;

/// Node counts to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 7_000, 50_000];

fn role_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_roles");
    group.sample_size(20);

    for &num_nodes in NODE_COUNTS {
        let params = NetworkBenchParams::with_default_density(num_nodes);
        let base = network::topology(params, SEED).expect("topology must generate");
        group.bench_with_input(BenchmarkId::from_parameter(params), &base, |b, unlabelled| {
            b.iter_batched(
                || (unlabelled.clone(), SmallRng::seed_from_u64(SEED)),
                |(mut graph, mut rng)| {
                    assign_roles(
                        &mut graph,
                        &RoleWeights::default_state_distribution(),
                        &RoleWeights::uniform(),
                        &mut rng,
                    )
                    .expect("roles must assign")
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, role_assignment);
criterion_main!(benches);
