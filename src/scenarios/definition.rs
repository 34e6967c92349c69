use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::common::interface::ScenarioMaker;
use crate::inference::{BeliefNetwork, PropagationConfig};
use crate::model::{ProbabilityTable, Value};

/// Literal table data: one value per column followed by the weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    /// Key into `ScenarioDefinition::tables`
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceDefinition {
    pub node: String,
    pub value: Value,
}

/// A network described as data, e.g.
///
/// ```json
/// {
///   "name": "coin",
///   "tables": { "coin": { "columns": ["coin"], "rows": [["heads", 1], ["tails", 1]] } },
///   "nodes": [ { "name": "coin", "table": "coin" } ],
///   "edges": [],
///   "evidence": [ { "node": "coin", "value": "heads" } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    #[serde(default)]
    pub propagation: PropagationConfig,
    pub tables: BTreeMap<String, TableDefinition>,
    pub nodes: Vec<NodeDefinition>,
    /// `[parent, child]` pairs, registered in order
    #[serde(default)]
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub evidence: Vec<EvidenceDefinition>,
}

impl ScenarioDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario definition")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("In scenario file {}", path.display()))
    }

    fn parse_tables(&self) -> Result<BTreeMap<&str, ProbabilityTable>> {
        self.tables
            .iter()
            .map(|(name, definition)| {
                let table = ProbabilityTable::from_literal(
                    definition.columns.clone(),
                    definition.rows.clone(),
                )
                .with_context(|| format!("Invalid table '{}'", name))?;
                Ok((name.as_str(), table))
            })
            .collect()
    }
}

impl ScenarioMaker for ScenarioDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn propagation(&self) -> PropagationConfig {
        self.propagation
    }

    fn build_network(&self, config: PropagationConfig) -> Result<BeliefNetwork> {
        info!("Building scenario {} with {} nodes", self.name, self.nodes.len());
        let tables = self.parse_tables()?;
        let mut network = BeliefNetwork::with_config(config)?;

        for node in &self.nodes {
            // Every node gets its own copy of the table
            let table = tables
                .get(node.table.as_str())
                .with_context(|| format!("Node '{}' uses unknown table '{}'", node.name, node.table))?
                .clone();
            network
                .add_node(&node.name, table)
                .with_context(|| format!("Failed to add node '{}'", node.name))?;
        }
        for (parent, child) in &self.edges {
            network
                .affects_by_name(parent, child)
                .with_context(|| format!("Failed to add edge {} -> {}", parent, child))?;
        }
        Ok(network)
    }

    fn evidence(&self) -> Vec<(String, Value)> {
        self.evidence
            .iter()
            .map(|evidence| (evidence.node.clone(), evidence.value.clone()))
            .collect()
    }
}
