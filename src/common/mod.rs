pub mod interface;
pub mod logging;
pub mod setup;

// Re-export key types
pub use interface::ScenarioMaker;
pub use setup::CommandLineOptions;
