//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use bayesnet_core::network::{Network, NodeSpec};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times, subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Node names used by the random networks: `N0`, `N1`, ...
#[allow(dead_code)]
pub fn node_name(idx: usize) -> String {
    format!("N{idx}")
}

/// Build a random DAG over `n` nodes.
///
/// Node `i` may only take parents from `0..i`, so the declaration order is already
/// topological. `edges` proposes (parent, child) pairs; pairs that point backwards, repeat,
/// or would push a node past `max_parents` are skipped. `probabilities` is cycled to fill
/// every table.
#[allow(dead_code)]
pub fn random_dag(
    n: usize,
    edges: &[(usize, usize)],
    max_parents: usize,
    probabilities: &[f64],
) -> Network {
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(parent, child) in edges {
        if parent < child
            && child < n
            && !parents[child].contains(&parent)
            && parents[child].len() < max_parents
        {
            parents[child].push(parent);
        }
    }

    let mut cursor = probabilities.iter().copied().cycle();
    let specs = parents
        .iter()
        .enumerate()
        .map(|(idx, node_parents)| NodeSpec {
            name: node_name(idx),
            parents: node_parents.iter().map(|p| node_name(*p)).collect(),
            probabilities: (0..1usize << node_parents.len())
                .map(|_| cursor.next().unwrap_or(0.5))
                .collect(),
        })
        .collect::<Vec<_>>();

    Network::build(specs, None).unwrap()
}
