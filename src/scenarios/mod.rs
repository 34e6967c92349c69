pub mod definition;
pub mod diner_loyalty;
pub mod factory;
pub mod three_doors;

pub use definition::ScenarioDefinition;
pub use factory::{ScenarioMakerFactory, BUILTIN_SCENARIOS};
