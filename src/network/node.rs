//! Node-level building blocks: identifiers, construction specs and the immutable
//! [`NetworkNode`] a [`super::Network`] owns.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Dense index of a node inside the [`super::Network`] that minted it.
///
/// Ids are assigned in declaration order and are only meaningful for that network. They
/// are not serialisable; persist node names instead.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Construction-time description of a single boolean variable.
///
/// `probabilities[row]` is P(node = true | parents), where `row` reads the parent values
/// as binary digits with the first listed parent as the most significant bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub parents: Vec<String>,
    pub probabilities: Vec<f64>,
}

impl NodeSpec {
    pub fn new<S: Into<String>>(name: S, parents: &[&str], probabilities: &[f64]) -> Self {
        NodeSpec {
            name: name.into(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            probabilities: probabilities.to_vec(),
        }
    }

    /// A parentless node with prior P(node = true) = `prior`.
    pub fn root<S: Into<String>>(name: S, prior: f64) -> Self {
        NodeSpec::new(name, &[], &[prior])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) probabilities: Vec<f64>,
}

impl NetworkNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parents in declared order. The order fixes the bit layout of the probability table.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Derived from the parent links, informational only.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Conditional probabilities of `true`, one per parent combination.
    pub fn true_probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// P(node = `value` | parent combination `row`).
    ///
    /// `row` must be below `2^parents().len()`; the network validated the table length at
    /// construction.
    pub fn probability(&self, value: bool, row: usize) -> f64 {
        let p_true = self.probabilities[row];
        if value {
            p_true
        } else {
            1.0 - p_true
        }
    }
}
