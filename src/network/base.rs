use std::collections::BTreeMap;

use crate::{
    config::{EngineConfig, NetworkDefinition},
    error::InferenceError,
};

use super::{
    graph::{validate_specs, EvaluationOrder},
    NetworkNode, NodeId, NodeSpec,
};

/// An immutable boolean Bayesian network together with its fixed evaluation order.
///
/// Nodes are owned by the network and refer to each other through [`NodeId`]s. Nothing
/// mutates a network after [`Network::build`] returns, so a single instance can be shared
/// by reference across threads and evaluated concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    index: BTreeMap<String, NodeId>,
    evaluation_order: Vec<NodeId>,
}

impl Network {
    /// Validate `specs` and assemble a network.
    ///
    /// When `evaluation_order` is `None` a topological order is derived from the graph,
    /// otherwise the supplied order is checked to list every node once with all parents
    /// ahead of their children.
    pub fn build(
        specs: Vec<NodeSpec>,
        evaluation_order: Option<Vec<String>>,
    ) -> Result<Network, InferenceError> {
        let index = validate_specs(&specs)?;

        let mut nodes = specs
            .into_iter()
            .enumerate()
            .map(|(idx, spec)| NetworkNode {
                id: NodeId(idx),
                parents: spec.parents.iter().map(|p| index[p.as_str()]).collect(),
                children: Vec::new(),
                name: spec.name,
                probabilities: spec.probabilities,
            })
            .collect::<Vec<NetworkNode>>();

        for child_idx in 0..nodes.len() {
            for parent in nodes[child_idx].parents.clone() {
                nodes[parent.index()].children.push(NodeId(child_idx));
            }
        }

        let order = EvaluationOrder::new(&nodes)?;
        let evaluation_order = match evaluation_order {
            Some(names) => order.check(&nodes, &index, &names)?,
            None => order.into_ids(),
        };

        tracing::debug!(
            "[Network::build] {} nodes, evaluation order: {:?}",
            nodes.len(),
            evaluation_order
                .iter()
                .map(|id| nodes[id.index()].name.as_str())
                .collect::<Vec<_>>()
        );

        Ok(Network {
            nodes,
            index,
            evaluation_order,
        })
    }

    pub fn find_node(&self, name: &str) -> Result<&NetworkNode, InferenceError> {
        self.index
            .get(name)
            .map(|id| &self.nodes[id.index()])
            .ok_or_else(|| InferenceError::UnknownVariable(name.to_string()))
    }

    pub fn node_id(&self, name: &str) -> Result<NodeId, InferenceError> {
        self.find_node(name).map(|node| node.id)
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different network with more nodes. Use [`Network::get_node`]
    /// for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &NetworkNode {
        &self.nodes[id.index()]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&NetworkNode> {
        self.nodes.get(id.index())
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Ancestors before descendants. This is the order the enumeration sums in.
    pub fn evaluation_order(&self) -> &[NodeId] {
        &self.evaluation_order
    }

    pub fn evaluation_order_names(&self) -> Vec<&str> {
        self.evaluation_order
            .iter()
            .map(|id| self.node(*id).name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuild the definition this network was built from, with its evaluation order spelled
    /// out.
    pub fn to_definition(&self, engine: EngineConfig) -> NetworkDefinition {
        NetworkDefinition {
            evaluation_order: Some(
                self.evaluation_order_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            engine,
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSpec {
                    name: node.name.clone(),
                    parents: node
                        .parents
                        .iter()
                        .map(|p| self.node(*p).name.clone())
                        .collect(),
                    probabilities: node.probabilities.clone(),
                })
                .collect(),
        }
    }
}
