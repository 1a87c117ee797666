//! Shared test utilities for network and query testing

use crate::network::{sample::sprinkler, Network, NodeSpec};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The bundled sprinkler network: W -> {S, R}, {S, R} -> WG, R -> SR
pub fn sprinkler_network() -> Network {
    init_logging();
    sprinkler().unwrap()
}

/// Two-node chain A -> B
pub fn chain_network(prior: f64, b_given_a: [f64; 2]) -> Network {
    init_logging();
    Network::build(
        vec![
            NodeSpec::root("A", prior),
            NodeSpec::new("B", &["A"], &b_given_a),
        ],
        None,
    )
    .unwrap()
}

/// Diamond A -> {B, C} -> D, so D reaches A along two paths
pub fn diamond_network() -> Network {
    init_logging();
    Network::build(
        vec![
            NodeSpec::root("A", 0.4),
            NodeSpec::new("B", &["A"], &[0.3, 0.6]),
            NodeSpec::new("C", &["A"], &[0.5, 0.2]),
            NodeSpec::new("D", &["B", "C"], &[0.1, 0.4, 0.7, 0.99]),
        ],
        None,
    )
    .unwrap()
}
