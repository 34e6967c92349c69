pub mod config;
pub mod network;
pub mod node;

// Re-export the network types for easy access
pub use config::PropagationConfig;
pub use network::BeliefNetwork;
pub use node::{BeliefNode, NodeId, Observation};
