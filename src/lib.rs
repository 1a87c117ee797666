//! # bayesnet-core
//!
//! Exact marginal and conditional probabilities over boolean Bayesian networks.
//!
//! ## Overview
//!
//! A [`network::Network`] is a directed acyclic graph of boolean variables. Each variable
//! carries a conditional probability table with one P(variable = true) entry per combination
//! of its parents' values. Queries of the form P(targets | evidence) are answered exactly by
//! enumeration: the joint mass of targets and evidence is divided by the mass of the
//! evidence, each computed by summing out every hidden ancestor.
//!
//! ## Architecture
//!
//! - **[`network`]**: nodes, construction-time validation, the fixed evaluation order
//! - **[`assignment`]**: tri-state bindings and ancestor-closed assignment sets
//! - **[`enumeration`]**: the recursive summation and probability-table lookup
//! - **[`query`]**: query text, numerator/denominator evaluation
//! - **[`config`]**: engine limits and TOML network definitions
//!
//! ## Quick Start
//!
//! ```rust
//! use bayesnet_core::{
//!     network::{Network, NodeSpec},
//!     query::QueryEvaluator,
//! };
//!
//! # fn main() -> Result<(), bayesnet_core::InferenceError> {
//! let network = Network::build(
//!     vec![
//!         NodeSpec::root("Rain", 0.2),
//!         NodeSpec::new("Wet", &["Rain"], &[0.1, 0.9]),
//!     ],
//!     None,
//! )?;
//!
//! let evaluator = QueryEvaluator::new(&network);
//! let p = evaluator.evaluate_str("Rain=T | Wet=T")?;
//! assert!((p - 0.18 / 0.26).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cost
//!
//! Enumeration is exponential in the number of hidden variables a query touches. The
//! [`config::EngineConfig`] guard rejects queries above a configurable limit rather than
//! running for an unbounded time.
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `bayesnet` command line tool (one-shot queries and an interactive loop)

pub mod assignment;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod network;
pub mod query;
#[cfg(test)]
mod tests;

pub use error::*;
