use serde::{Deserialize, Serialize};

use crate::errors::BeliefError;

/// Bounds on the graph walk triggered by an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Maximum number of hops a single wave may travel from the observed
    /// node. `None` walks until the edges run out.
    pub max_depth: Option<usize>,
    /// Re-traverse the edges in the opposite direction after the first
    /// forward and backward waves.
    pub second_wave: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        PropagationConfig {
            max_depth: None,
            second_wave: true,
        }
    }
}

impl PropagationConfig {
    pub fn validate(self) -> Result<Self, BeliefError> {
        if self.max_depth == Some(0) {
            return Err(BeliefError::InvalidConfig(
                "max_depth must be > 0 when set".into(),
            ));
        }
        Ok(self)
    }

    /// Whether a wave that has already travelled `depth` hops may take one more.
    pub(crate) fn allows(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PropagationConfig::default();
        assert_eq!(config.max_depth, None);
        assert!(config.second_wave);
        assert!(config.allows(1_000));
    }

    #[test]
    fn test_validate() {
        let zero = PropagationConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(BeliefError::InvalidConfig(_))));

        let bounded = PropagationConfig {
            max_depth: Some(2),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(bounded.allows(2));
        assert!(!bounded.allows(3));
    }

    #[test]
    fn test_partial_deserialize() {
        let config: PropagationConfig = serde_json::from_str(r#"{"second_wave": false}"#).unwrap();
        assert_eq!(config.max_depth, None);
        assert!(!config.second_wave);
    }
}
