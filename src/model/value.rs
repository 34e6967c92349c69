use serde::{Deserialize, Serialize};

use crate::errors::BeliefError;

/// Discrete value taken by a variable in one table row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl TryFrom<serde_json::Value> for Value {
    type Error = BeliefError;

    fn try_from(json_value: serde_json::Value) -> Result<Self, Self::Error> {
        match json_value {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Integer(i)),
                // Floats are weights, never variable values
                None => Err(BeliefError::UnsupportedValue(n.to_string())),
            },
            other => Err(BeliefError::UnsupportedValue(other.to_string())),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl Value {
    /// Parse a command-line token: `true`/`false` and integers keep their
    /// type, anything else is a string.
    pub fn parse_token(token: &str) -> Self {
        if let Ok(b) = token.parse::<bool>() {
            Value::Boolean(b)
        } else if let Ok(i) = token.parse::<i64>() {
            Value::Integer(i)
        } else {
            Value::String(token.to_string())
        }
    }
}
