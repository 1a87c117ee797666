//! One-shot command bodies. Each returns the text `main` prints.

use bayesnet_core::{
    config::NetworkDefinition, network::sample::sprinkler_definition, query::QueryEvaluator,
    InferenceError,
};
use std::path::PathBuf;

/// The definition at `path`, or the bundled sprinkler network.
pub fn load_definition(path: Option<PathBuf>) -> Result<NetworkDefinition, InferenceError> {
    match path {
        Some(path) => NetworkDefinition::load(path),
        None => sprinkler_definition(),
    }
}

pub fn query(
    definition: &NetworkDefinition,
    text: &str,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let network = definition.build()?;
    let evaluator = QueryEvaluator::with_config(&network, definition.engine);
    let outcome = evaluator.evaluate_detailed(&text.parse()?)?;
    if json {
        Ok(serde_json::to_string_pretty(&outcome)?)
    } else {
        Ok(format!("P({}) = {}", outcome.query, outcome.probability))
    }
}

/// The definition as TOML, with the evaluation order the network settled on.
pub fn show(definition: &NetworkDefinition) -> Result<String, InferenceError> {
    let network = definition.build()?;
    network.to_definition(definition.engine).to_toml_string()
}
