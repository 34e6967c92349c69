pub mod common;
pub mod errors;
pub mod inference;
pub mod model;
pub mod scenarios;

pub use errors::BeliefError;
pub use inference::{BeliefNetwork, NodeId, PropagationConfig};
pub use model::{Marginal, ProbabilityTable, Row, Value};
