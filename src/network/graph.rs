//! Structural validation of node specs and evaluation orders.

use petgraph::{algo::toposort, graph::NodeIndex, Graph};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::InferenceError;

use super::{NetworkNode, NodeId, NodeSpec};

/// Probability tables hold `2^parents` rows, so the parent count must keep the row index
/// inside a `usize` and the table inside memory.
pub const MAX_PARENTS: usize = 30;

/// Check names, parent references and table shapes. Returns the name index on success.
pub(crate) fn validate_specs(
    specs: &[NodeSpec],
) -> Result<BTreeMap<String, NodeId>, InferenceError> {
    if specs.is_empty() {
        return Err(InferenceError::InvalidNetworkDefinition(
            "network has no nodes".to_string(),
        ));
    }

    let mut index = BTreeMap::new();
    for (idx, spec) in specs.iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(InferenceError::InvalidNetworkDefinition(format!(
                "node #{idx} has an empty name"
            )));
        }
        if index.insert(spec.name.clone(), NodeId(idx)).is_some() {
            return Err(InferenceError::InvalidNetworkDefinition(format!(
                "duplicate node name '{}'",
                spec.name
            )));
        }
    }

    for spec in specs {
        let mut seen = BTreeSet::new();
        for parent in spec.parents.iter() {
            if *parent == spec.name {
                return Err(InferenceError::InvalidNetworkDefinition(format!(
                    "node '{}' lists itself as a parent",
                    spec.name
                )));
            }
            if !index.contains_key(parent) {
                return Err(InferenceError::InvalidNetworkDefinition(format!(
                    "node '{}' references unknown parent '{parent}'",
                    spec.name
                )));
            }
            if !seen.insert(parent.as_str()) {
                return Err(InferenceError::InvalidNetworkDefinition(format!(
                    "node '{}' lists parent '{parent}' more than once",
                    spec.name
                )));
            }
        }

        if spec.parents.len() > MAX_PARENTS {
            return Err(InferenceError::InvalidNetworkDefinition(format!(
                "node '{}' has {} parents, at most {MAX_PARENTS} are supported",
                spec.name,
                spec.parents.len()
            )));
        }

        let expected_rows = 1usize << spec.parents.len();
        if spec.probabilities.len() != expected_rows {
            return Err(InferenceError::InvalidNetworkDefinition(format!(
                "node '{}' has {} parents and needs {expected_rows} probabilities, got {}",
                spec.name,
                spec.parents.len(),
                spec.probabilities.len()
            )));
        }

        if let Some(bad) = spec
            .probabilities
            .iter()
            .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
        {
            return Err(InferenceError::InvalidNetworkDefinition(format!(
                "node '{}' has probability {bad} outside [0, 1]",
                spec.name
            )));
        }
    }

    Ok(index)
}

/// A topological order of the parent -> child graph.
pub(crate) struct EvaluationOrder(Vec<NodeId>);

impl EvaluationOrder {
    /// Sort the nodes topologically. Fails when the parent links contain a cycle.
    pub(crate) fn new(nodes: &[NetworkNode]) -> Result<Self, InferenceError> {
        let mut graph: Graph<NodeId, ()> = Graph::with_capacity(nodes.len(), nodes.len());
        let indices = nodes
            .iter()
            .map(|node| graph.add_node(node.id))
            .collect::<Vec<NodeIndex>>();
        for node in nodes {
            for parent in node.parents.iter() {
                graph.add_edge(indices[parent.index()], indices[node.id.index()], ());
            }
        }

        let sorted = toposort(&graph, None).map_err(|cycle| {
            InferenceError::InvalidNetworkDefinition(format!(
                "parent links form a cycle through '{}'",
                nodes[graph[cycle.node_id()].index()].name
            ))
        })?;

        Ok(EvaluationOrder(
            sorted.into_iter().map(|idx| graph[idx]).collect(),
        ))
    }

    pub(crate) fn into_ids(self) -> Vec<NodeId> {
        self.0
    }

    /// Validate a caller-supplied order against the graph.
    pub(crate) fn check(
        &self,
        nodes: &[NetworkNode],
        index: &BTreeMap<String, NodeId>,
        names: &[String],
    ) -> Result<Vec<NodeId>, InferenceError> {
        let mut position = vec![None; nodes.len()];
        let mut ids = Vec::with_capacity(names.len());
        for (pos, name) in names.iter().enumerate() {
            let id = *index.get(name).ok_or_else(|| {
                InferenceError::InvalidTopologicalOrder(format!("'{name}' is not a network node"))
            })?;
            if position[id.index()].replace(pos).is_some() {
                return Err(InferenceError::InvalidTopologicalOrder(format!(
                    "'{name}' appears more than once"
                )));
            }
            ids.push(id);
        }

        if let Some(missing) = nodes.iter().find(|node| position[node.id.index()].is_none()) {
            return Err(InferenceError::InvalidTopologicalOrder(format!(
                "'{}' is missing",
                missing.name
            )));
        }

        for node in nodes {
            for parent in node.parents.iter() {
                if position[parent.index()] > position[node.id.index()] {
                    return Err(InferenceError::InvalidTopologicalOrder(format!(
                        "parent '{}' must precede '{}'",
                        nodes[parent.index()].name,
                        node.name
                    )));
                }
            }
        }

        debug_assert_eq!(ids.len(), self.0.len());
        Ok(ids)
    }
}
