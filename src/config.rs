use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};

use crate::{
    error::InferenceError,
    network::{Network, NodeSpec},
};

/// Default ceiling on unassigned variables per enumeration. Each one doubles the work.
pub const DEFAULT_MAX_HIDDEN_VARIABLES: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Queries whose ancestor closure leaves more unassigned variables than this are
    /// rejected with [`InferenceError::EnumerationLimit`] instead of being enumerated.
    pub max_hidden_variables: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_hidden_variables: DEFAULT_MAX_HIDDEN_VARIABLES,
        }
    }
}

impl EngineConfig {
    pub fn unbounded() -> Self {
        EngineConfig {
            max_hidden_variables: usize::MAX,
        }
    }

    pub fn with_max_hidden_variables(max_hidden_variables: usize) -> Self {
        EngineConfig {
            max_hidden_variables,
        }
    }
}

/// A network as written in a TOML definition file.
///
/// ```toml
/// evaluation_order = ["A", "B"]
///
/// [engine]
/// max_hidden_variables = 16
///
/// [[nodes]]
/// name = "A"
/// probabilities = [0.3]
///
/// [[nodes]]
/// name = "B"
/// parents = ["A"]
/// probabilities = [0.1, 0.9]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_order: Option<Vec<String>>,
    #[serde(default)]
    pub engine: EngineConfig,
    pub nodes: Vec<NodeSpec>,
}

impl NetworkDefinition {
    pub fn new(nodes: Vec<NodeSpec>) -> Self {
        NetworkDefinition {
            evaluation_order: None,
            engine: EngineConfig::default(),
            nodes,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, InferenceError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InferenceError> {
        tracing::debug!("Reading network definition from: {:?}", path.as_ref());
        let content = read_to_string(path)?;
        NetworkDefinition::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, InferenceError> {
        Ok(toml::to_string(self)?)
    }

    pub fn build(&self) -> Result<Network, InferenceError> {
        Network::build(self.nodes.clone(), self.evaluation_order.clone())
    }
}
