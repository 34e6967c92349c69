use anyhow::{Context, Result};

use crate::inference::{BeliefNetwork, PropagationConfig};
use crate::model::Value;

/// Something that can assemble a belief network and knows which evidence
/// its story starts from.
pub trait ScenarioMaker {
    fn name(&self) -> &str;

    /// Propagation settings the scenario was written for
    fn propagation(&self) -> PropagationConfig {
        PropagationConfig::default()
    }

    /// Build the network with priors only, no evidence applied.
    fn build_network(&self, config: PropagationConfig) -> Result<BeliefNetwork>;

    /// Evidence to apply, in order, as `(node name, value)` pairs
    fn evidence(&self) -> Vec<(String, Value)>;

    /// Build the network and apply the scenario's evidence.
    fn run(&self, config: PropagationConfig) -> Result<BeliefNetwork> {
        let mut network = self.build_network(config)?;
        for (node, value) in self.evidence() {
            network
                .observe_by_name(&node, value.clone())
                .with_context(|| format!("Failed to observe {} = {}", node, value))?;
        }
        Ok(network)
    }
}
