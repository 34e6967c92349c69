use chrono::Utc;
use log::{debug, info, trace, warn};
use std::collections::{HashMap, HashSet};

use super::config::PropagationConfig;
use super::node::{BeliefNode, NodeId, Observation};
use crate::errors::BeliefError;
use crate::model::{Marginal, ProbabilityTable, Value};

/// Directed graph of belief nodes that propagates observed evidence by
/// exchanging marginals between tables that share variables.
///
/// Nodes are stored in an arena and addressed by `NodeId`. An observation
/// conditions the observed node's table and then walks the graph in four
/// waves: forward to the children, backward to the parents, then backward
/// through the children and forward through the parents. Nothing is
/// memoized, so a node reachable along several paths is updated once per
/// path.
#[derive(Debug, Clone, Default)]
pub struct BeliefNetwork {
    nodes: Vec<BeliefNode>,
    index: HashMap<String, NodeId>,
    config: PropagationConfig,
    evidence: Vec<Observation>,
}

impl BeliefNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PropagationConfig) -> Result<Self, BeliefError> {
        Ok(BeliefNetwork {
            config: config.validate()?,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Add a node named after one of `table`'s columns.
    pub fn add_node(&mut self, name: &str, table: ProbabilityTable) -> Result<NodeId, BeliefError> {
        if self.index.contains_key(name) {
            return Err(BeliefError::DuplicateNode(name.to_string()));
        }
        let node = BeliefNode::new(name, table)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.index.insert(name.to_string(), id);
        debug!("Added node {} as {}", name, id);
        Ok(id)
    }

    pub fn node_id(&self, name: &str) -> Result<NodeId, BeliefError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| BeliefError::UnknownNode(name.to_string()))
    }

    pub fn node(&self, id: NodeId) -> Result<&BeliefNode, BeliefError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| BeliefError::UnknownNode(id.to_string()))
    }

    pub fn nodes(&self) -> &[BeliefNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register that `parent` affects `child`, adding the reverse edge too.
    ///
    /// Edges that would close a directed cycle are rejected, since the walk
    /// along them would never end.
    pub fn affects(&mut self, parent: NodeId, child: NodeId) -> Result<(), BeliefError> {
        let parent_name = self.node(parent)?.name().to_string();
        let child_name = self.node(child)?.name().to_string();

        if self.nodes[parent.0].children.contains(&child) {
            return Err(BeliefError::DuplicateEdge {
                parent: parent_name,
                child: child_name,
            });
        }
        if parent == child || self.reaches(child, parent) {
            return Err(BeliefError::CycleDetected {
                parent: parent_name,
                child: child_name,
            });
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parents.push(parent);
        debug!("{} affects {}", parent_name, child_name);
        Ok(())
    }

    /// Name-resolving form of `affects`.
    pub fn affects_by_name(&mut self, parent: &str, child: &str) -> Result<(), BeliefError> {
        let parent = self.node_id(parent)?;
        let child = self.node_id(child)?;
        self.affects(parent, child)
    }

    // Is `to` reachable from `from` along child edges?
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if seen.insert(current) {
                stack.extend(self.nodes[current.0].children.iter().copied());
            }
        }
        false
    }

    /// Observe `value` for node `id` and propagate the evidence.
    ///
    /// Returns `Ok(false)` without touching anything when the node has
    /// already been observed. If propagation fails, every table is rolled
    /// back to its state before the call.
    pub fn observe(&mut self, id: NodeId, value: Value) -> Result<bool, BeliefError> {
        let node = self.node(id)?;
        if let Some(previous) = node.observed() {
            warn!(
                "Ignoring {} = {}: already observed as {}",
                node.name(),
                value,
                previous
            );
            return Ok(false);
        }

        info!("Observing {} = {}", node.name(), value);
        let snapshot: Vec<ProbabilityTable> =
            self.nodes.iter().map(|node| node.table().clone()).collect();

        if let Err(err) = self.propagate_observation(id, &value) {
            for (node, table) in self.nodes.iter_mut().zip(snapshot) {
                node.replace_table(table);
            }
            return Err(err);
        }

        let node = &mut self.nodes[id.0];
        node.observed = Some(value.clone());
        self.evidence.push(Observation {
            node: node.name().to_string(),
            value,
            observed_at: Utc::now(),
        });
        Ok(true)
    }

    /// Name-resolving form of `observe`.
    pub fn observe_by_name(&mut self, name: &str, value: Value) -> Result<bool, BeliefError> {
        let id = self.node_id(name)?;
        self.observe(id, value)
    }

    fn propagate_observation(&mut self, id: NodeId, value: &Value) -> Result<(), BeliefError> {
        let node = &mut self.nodes[id.0];
        let conditioned = node.table().condition(node.name(), value)?;
        node.replace_table(conditioned);

        let message = node.table().clone();
        let children = node.children.clone();
        let parents = node.parents.clone();

        for child in &children {
            self.forward_propagate(*child, &message, 1)?;
        }
        for parent in &parents {
            self.backward_propagate(*parent, &message, 1)?;
        }
        if self.config.second_wave {
            for child in &children {
                self.backward_propagate(*child, &message, 1)?;
            }
            for parent in &parents {
                self.forward_propagate(*parent, &message, 1)?;
            }
        }
        Ok(())
    }

    fn forward_propagate(
        &mut self,
        id: NodeId,
        message: &ProbabilityTable,
        depth: usize,
    ) -> Result<(), BeliefError> {
        if !self.config.allows(depth) {
            trace!("Stopping forward wave at {} (depth {})", id, depth);
            return Ok(());
        }
        let node = &mut self.nodes[id.0];
        debug!("Forward propagating beliefs on {}", node.name());
        node.absorb(message)?;

        let next = node.table().clone();
        let children = node.children.clone();
        for child in children {
            self.forward_propagate(child, &next, depth + 1)?;
        }
        Ok(())
    }

    fn backward_propagate(
        &mut self,
        id: NodeId,
        message: &ProbabilityTable,
        depth: usize,
    ) -> Result<(), BeliefError> {
        if !self.config.allows(depth) {
            trace!("Stopping backward wave at {} (depth {})", id, depth);
            return Ok(());
        }
        let node = &mut self.nodes[id.0];
        debug!("Backward propagating beliefs on {}", node.name());
        node.absorb(message)?;

        let next = node.table().clone();
        let parents = node.parents.clone();
        for parent in parents {
            self.backward_propagate(parent, &next, depth + 1)?;
        }
        Ok(())
    }

    /// Marginal of the node's own variable
    pub fn probability(&self, id: NodeId) -> Result<Marginal, BeliefError> {
        self.node(id)?.probability()
    }

    pub fn probability_by_name(&self, name: &str) -> Result<Marginal, BeliefError> {
        self.probability(self.node_id(name)?)
    }

    /// Probability of a single value; values the table never mentions are 0.
    pub fn probability_of(&self, id: NodeId, value: &Value) -> Result<f64, BeliefError> {
        Ok(self.probability(id)?.get(value).copied().unwrap_or(0.0))
    }

    /// Every node's own marginal, in the order the nodes were added
    pub fn marginals(&self) -> Result<Vec<(String, Marginal)>, BeliefError> {
        self.nodes
            .iter()
            .map(|node| Ok((node.name().to_string(), node.probability()?)))
            .collect()
    }

    /// Evidence applied so far, oldest first
    pub fn evidence(&self) -> &[Observation] {
        &self.evidence
    }

    /// Restore every node's original table and forget all evidence.
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset();
        }
        self.evidence.clear();
        info!("Network reset to prior beliefs");
    }
}
