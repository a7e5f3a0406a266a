//! Collusion augmentation benchmarks.
//!
//! Augments a fresh copy of a labelled network on every iteration, sweeping
//! the accomplice bound.
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

use fraudgraph_benches::{
    network,
    params::{CollusionBenchParams, NetworkBenchParams},
};
use fraudgraph_core::augment_collusion;

/// Seed used for network generation and accomplice sampling.
const SEED: u64 = 42;

/// Node counts to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 7_000];

/// Accomplice bounds to benchmark.
const MAX_ACCOMPLICE_EDGES: &[usize] = &[1, 5, 20];

fn collusion_augmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("augment_collusion");
    group.sample_size(20);

    for &num_nodes in NODE_COUNTS {
        let labelled = network::labelled(NetworkBenchParams::with_default_density(num_nodes), SEED)
            .expect("labelled network must generate");
        for &max_accomplice_edges in MAX_ACCOMPLICE_EDGES {
            let params = CollusionBenchParams {
                num_nodes,
                max_accomplice_edges,
            };
            group.bench_with_input(BenchmarkId::from_parameter(params), &labelled, |b, graph| {
                b.iter_batched(
                    || (graph.clone(), SmallRng::seed_from_u64(SEED)),
                    |(mut augmented, mut rng)| {
                        augment_collusion(&mut augmented, max_accomplice_edges, &mut rng)
                            .expect("augmentation must succeed")
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, collusion_augmentation);
criterion_main!(benches);
