//! Variable bindings and the ancestor-closed working sets the solver enumerates over.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

use crate::{
    error::InferenceError,
    network::{Network, NodeId},
};

/// Tri-state binding of a boolean variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruthValue {
    True,
    False,
    #[default]
    Unassigned,
}

impl TruthValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TruthValue::True => Some(true),
            TruthValue::False => Some(false),
            TruthValue::Unassigned => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        !matches!(self, TruthValue::Unassigned)
    }

    /// Parse a query value token (`T`, `F`, `TRUE`, `FALSE`, any case) for `variable`.
    pub fn parse_token(variable: &str, token: &str) -> Result<bool, InferenceError> {
        match token.trim().to_ascii_uppercase().as_str() {
            "T" | "TRUE" => Ok(true),
            "F" | "FALSE" => Ok(false),
            _ => Err(InferenceError::InvalidAssignmentValue {
                variable: variable.to_string(),
                token: token.to_string(),
            }),
        }
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        if value {
            TruthValue::True
        } else {
            TruthValue::False
        }
    }
}

impl Display for TruthValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TruthValue::True => write!(f, "T"),
            TruthValue::False => write!(f, "F"),
            TruthValue::Unassigned => write!(f, "?"),
        }
    }
}

/// A named variable bound to a [`TruthValue`].
///
/// `node` is filled in by name lookup against a [`Network`]; once resolved it always
/// points at the node called `variable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    variable: String,
    value: TruthValue,
    #[serde(skip)]
    node: Option<NodeId>,
}

impl Assignment {
    pub fn new<S: Into<String>>(variable: S, value: TruthValue) -> Self {
        Assignment {
            variable: variable.into(),
            value,
            node: None,
        }
    }

    /// An observed variable with a fixed value.
    pub fn observed<S: Into<String>>(variable: S, value: bool) -> Self {
        Assignment::new(variable, value.into())
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn value(&self) -> TruthValue {
        self.value
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Link this assignment to its network node.
    pub fn resolve(&mut self, network: &Network) -> Result<NodeId, InferenceError> {
        let id = network.node_id(&self.variable)?;
        self.node = Some(id);
        Ok(id)
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.variable, self.value)
    }
}

/// The relevant-variable closure of a set of observed assignments.
///
/// Holds every observed variable plus each of their ancestors exactly once; ancestors that
/// were not observed stay [`TruthValue::Unassigned`] until the solver branches on them.
/// Sets are plain values: branching clones the set, so sibling branches never see each
/// other's bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentSet {
    entries: Vec<Assignment>,
    contradictory: bool,
}

impl AssignmentSet {
    /// Resolve `observed` against `network` and close it over all ancestors.
    ///
    /// A variable observed twice with the same value is kept once. Observing it with both
    /// values makes the set contradictory, and its probability mass is zero. An observation
    /// must carry a value; [`TruthValue::Unassigned`] is rejected as
    /// [`InferenceError::InvalidAssignmentValue`].
    pub fn closure(network: &Network, observed: &[Assignment]) -> Result<Self, InferenceError> {
        let mut set = AssignmentSet::default();
        for assignment in observed {
            if !assignment.value.is_assigned() {
                return Err(InferenceError::InvalidAssignmentValue {
                    variable: assignment.variable.clone(),
                    token: assignment.value.to_string(),
                });
            }
            let mut assignment = assignment.clone();
            let id = assignment.resolve(network)?;
            match set.position(id) {
                Some(pos) => {
                    if set.entries[pos].value != assignment.value {
                        tracing::debug!(
                            "[AssignmentSet] {} conflicts with {}",
                            assignment,
                            set.entries[pos]
                        );
                        set.contradictory = true;
                    }
                }
                None => set.entries.push(assignment),
            }
        }
        set.close_ancestors(network);
        Ok(set)
    }

    /// Add every missing ancestor of the current entries as unassigned. Idempotent.
    ///
    /// Ancestors are appended in depth-first preorder, first parent first.
    pub fn close_ancestors(&mut self, network: &Network) {
        let starting = self
            .entries
            .iter()
            .filter_map(|entry| entry.node)
            .collect::<Vec<NodeId>>();
        let mut seen = starting.iter().copied().collect::<BTreeSet<NodeId>>();

        for id in starting {
            let mut stack = network.node(id).parents().to_vec();
            stack.reverse();
            while let Some(parent) = stack.pop() {
                if !seen.insert(parent) {
                    continue;
                }
                let parent_node = network.node(parent);
                self.entries.push(Assignment {
                    variable: parent_node.name().to_string(),
                    value: TruthValue::Unassigned,
                    node: Some(parent),
                });
                stack.extend(parent_node.parents().iter().rev().copied());
            }
        }
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.node == Some(id))
    }

    pub fn find(&self, variable: &str) -> Option<&Assignment> {
        self.entries.iter().find(|entry| entry.variable == variable)
    }

    /// The binding of node `id`, or `None` when the node is outside the closure.
    pub fn value_of(&self, id: NodeId) -> Option<TruthValue> {
        self.position(id).map(|pos| self.entries[pos].value)
    }

    /// A copy of this set with node `id` bound to `value`. `self` is left untouched.
    pub fn with_value(&self, id: NodeId, value: bool) -> AssignmentSet {
        let mut branch = self.clone();
        if let Some(pos) = branch.position(id) {
            branch.entries[pos].value = value.into();
        }
        branch
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variables the solver will have to sum out.
    pub fn hidden_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.value.is_assigned())
            .count()
    }

    pub fn is_contradictory(&self) -> bool {
        self.contradictory
    }
}

impl Display for AssignmentSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = self.entries.iter().map(|e| e.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", parts.join(","))
    }
}
