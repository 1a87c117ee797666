//! Performance benchmarks for exact enumeration
//!
//! Measures:
//! - Conditional queries against the bundled sprinkler network
//! - Marginals whose ancestor closure grows with network depth
//!
//! Run with: cargo bench

use bayesnet_core::{
    config::EngineConfig,
    network::{sample::sprinkler, Network, NodeSpec},
    query::QueryEvaluator,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Layered network: each node depends on the two nodes before it.
fn layered_network(n: usize) -> Network {
    let specs = (0..n)
        .map(|i| {
            let parents = (i.saturating_sub(2)..i)
                .map(|p| format!("N{p}"))
                .collect::<Vec<_>>();
            let rows = 1usize << parents.len();
            NodeSpec {
                name: format!("N{i}"),
                parents,
                probabilities: (0..rows).map(|r| 0.1 + 0.8 * r as f64 / rows as f64).collect(),
            }
        })
        .collect();
    Network::build(specs, None).unwrap()
}

fn bench_sprinkler_queries(c: &mut Criterion) {
    let network = sprinkler().unwrap();
    let evaluator = QueryEvaluator::new(&network);

    let mut group = c.benchmark_group("sprinkler");
    for query in ["S=T|W=T", "W=T|WG=T", "R=T,S=F|WG=T,SR=F"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, q| {
            b.iter(|| evaluator.evaluate_str(black_box(q)).unwrap())
        });
    }
    group.finish();
}

fn bench_layered_marginals(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_marginal");
    for n in [8usize, 12, 16] {
        let network = layered_network(n);
        let evaluator = QueryEvaluator::with_config(&network, EngineConfig::unbounded());
        let query = format!("N{}=T", n - 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, q| {
            b.iter(|| evaluator.evaluate_str(black_box(q)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sprinkler_queries, bench_layered_marginals);
criterion_main!(benches);
