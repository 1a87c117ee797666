//! Network module: the immutable DAG of boolean variables inference runs over.
//!
//! # Module Organization
//!
//! - `node`: identifiers, construction specs and [`NetworkNode`]
//! - `graph`: `NodeSpec` validation, cycle detection and evaluation-order checks
//! - `base`: [`Network`] itself and its read-only lookups
//! - [`sample`]: the bundled sprinkler network
//!
//! ```rust
//! use bayesnet_core::network::{Network, NodeSpec};
//!
//! let network = Network::build(
//!     vec![
//!         NodeSpec::root("A", 0.3),
//!         NodeSpec::new("B", &["A"], &[0.1, 0.9]),
//!     ],
//!     None,
//! )
//! .unwrap();
//! assert_eq!(network.evaluation_order_names(), vec!["A", "B"]);
//! ```

mod base;
mod graph;
mod node;
pub mod sample;


pub use base::Network;
pub use graph::MAX_PARENTS;
pub use node::{NetworkNode, NodeId, NodeSpec};
