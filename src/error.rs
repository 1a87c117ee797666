use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum InferenceError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    #[error("Invalid value '{token}' for variable {variable}, expected T or F")]
    InvalidAssignmentValue { variable: String, token: String },
    #[error("Invalid network definition: {0}")]
    InvalidNetworkDefinition(String),
    #[error("Invalid evaluation order: {0}")]
    InvalidTopologicalOrder(String),
    #[error("Evidence '{evidence}' has zero probability, conditional is undefined")]
    DivisionUndefined { evidence: String },
    #[error("Internal error: parent {parent} of {variable} has no value during enumeration")]
    UnresolvedParent { variable: String, parent: String },
    #[error("Malformed query: {0}")]
    QuerySyntax(String),
    #[error("Query needs {hidden} hidden variables, enumeration limit is {limit}")]
    EnumerationLimit { hidden: usize, limit: usize },
    #[error("File System error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl InferenceError {
    /// Whether an interactive caller can report the error and keep prompting.
    ///
    /// Construction failures, I/O failures and broken solver invariants leave no usable
    /// network behind and are fatal.
    pub fn is_recoverable(&self) -> bool {
        match self {
            InferenceError::UnknownVariable(_) => true,
            InferenceError::InvalidAssignmentValue { .. } => true,
            InferenceError::QuerySyntax(_) => true,
            InferenceError::DivisionUndefined { .. } => true,
            InferenceError::EnumerationLimit { .. } => true,
            InferenceError::InvalidNetworkDefinition(_) => false,
            InferenceError::InvalidTopologicalOrder(_) => false,
            InferenceError::UnresolvedParent { .. } => false,
            InferenceError::Io(_) => false,
            InferenceError::Serialization(_) => false,
        }
    }
}

impl From<toml::de::Error> for InferenceError {
    fn from(src: toml::de::Error) -> InferenceError {
        InferenceError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for InferenceError {
    fn from(src: toml::ser::Error) -> InferenceError {
        InferenceError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for InferenceError {
    fn from(src: JsonError) -> InferenceError {
        InferenceError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for InferenceError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => InferenceError::Io(format!("Not found: {x}")),
            _ => InferenceError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
