//! The sprinkler network used by the CLI when no network file is given.

use crate::{config::NetworkDefinition, error::InferenceError};

use super::Network;

pub const SPRINKLER_TOML: &str = include_str!("sprinkler.toml");

pub fn sprinkler_definition() -> Result<NetworkDefinition, InferenceError> {
    NetworkDefinition::from_toml_str(SPRINKLER_TOML)
}

pub fn sprinkler() -> Result<Network, InferenceError> {
    sprinkler_definition()?.build()
}
