use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BeliefError;
use crate::model::{Marginal, ProbabilityTable, Value};

/// Stable index of a node inside a `BeliefNetwork`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A variable in the network together with the table it currently believes.
#[derive(Debug, Clone)]
pub struct BeliefNode {
    name: String,
    /// Table the node was created with, restored on reset
    prior: ProbabilityTable,
    /// Current belief, replaced as evidence propagates
    table: ProbabilityTable,
    /// Nodes this one affects, in registration order
    pub(crate) children: Vec<NodeId>,
    /// Nodes that affect this one, in registration order
    pub(crate) parents: Vec<NodeId>,
    pub(crate) observed: Option<Value>,
}

impl BeliefNode {
    pub(crate) fn new(name: &str, table: ProbabilityTable) -> Result<Self, BeliefError> {
        if !table.has_column(name) {
            return Err(BeliefError::UnknownVariable(name.to_string()));
        }
        Ok(BeliefNode {
            name: name.to_string(),
            prior: table.clone(),
            table,
            children: Vec::new(),
            parents: Vec::new(),
            observed: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    pub fn prior(&self) -> &ProbabilityTable {
        &self.prior
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Value this node was observed at, if any
    pub fn observed(&self) -> Option<&Value> {
        self.observed.as_ref()
    }

    /// Marginal of the node's own variable under its current table
    pub fn probability(&self) -> Result<Marginal, BeliefError> {
        self.table.marginal(&self.name)
    }

    pub(crate) fn replace_table(&mut self, table: ProbabilityTable) {
        self.table = table;
    }

    /// Fold an incoming message into the current table.
    pub(crate) fn absorb(&mut self, message: &ProbabilityTable) -> Result<(), BeliefError> {
        self.table = self.table.apply_shared_beliefs(message)?;
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.table = self.prior.clone();
        self.observed = None;
    }
}

/// One piece of evidence applied to the network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub node: String,
    pub value: Value,
    pub observed_at: DateTime<Utc>,
}
