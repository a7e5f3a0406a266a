//! GraphML encoding and decoding benchmarks.
//!
//! Uses in-memory buffers so the numbers exclude filesystem latency.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use fraudgraph_benches::{network, params::NetworkBenchParams};
use fraudgraph_core::GraphCodec;
use fraudgraph_graphml::GraphmlCodec;

/// Seed used for network generation.
const SEED: u64 = 42;

/// Node counts to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 7_000];

fn graphml_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("graphml");
    group.sample_size(20);

    for &num_nodes in NODE_COUNTS {
        let params = NetworkBenchParams::with_default_density(num_nodes);
        let graph = network::labelled(params, SEED).expect("labelled network must generate");
        let encoded = GraphmlCodec.to_bytes(&graph).expect("graph must encode");
        group.throughput(Throughput::Bytes(
            u64::try_from(encoded.len()).unwrap_or(u64::MAX),
        ));

        group.bench_with_input(BenchmarkId::new("write", params), &graph, |b, source| {
            b.iter(|| GraphmlCodec.to_bytes(source).expect("graph must encode"));
        });
        group.bench_with_input(BenchmarkId::new("read", params), &encoded, |b, bytes| {
            b.iter(|| GraphmlCodec.from_bytes(bytes).expect("graph must decode"));
        });
    }

    group.finish();
}

criterion_group!(benches, graphml_codec);
criterion_main!(benches);
