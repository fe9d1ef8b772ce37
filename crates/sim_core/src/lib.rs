pub mod clock;
pub mod cluster;
pub mod distributions;
pub mod ecs;
pub mod error;
pub mod generator;
pub mod profiling;
pub mod resource;
pub mod runner;
pub mod scenario;
pub mod simulation;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{ConfigError, SimError, SimResult};
pub use scenario::SimulationConfig;
pub use simulation::{run, Simulation};
pub use telemetry::{PodStats, Sample};
