//! Scenario setup: validate a configuration and populate the world with the
//! initial cluster, generator and bookkeeping resources.

mod build;
mod params;

pub use build::{build_scenario, SimulationEndTime};
pub use params::SimulationConfig;
