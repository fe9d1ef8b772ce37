#![allow(dead_code)]

use bevy_ecs::prelude::World;
use sim_core::runner::initialize_simulation;
use sim_core::scenario::{build_scenario, SimulationConfig};
use sim_core::test_helpers::test_config;

/// Builder for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldBuilder {
    config: SimulationConfig,
}

impl Default for TestWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorldBuilder {
    /// Defaults with the shared test seed.
    pub fn new() -> Self {
        Self {
            config: test_config(),
        }
    }

    pub fn with_config(mut self, f: impl FnOnce(SimulationConfig) -> SimulationConfig) -> Self {
        self.config = f(self.config);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Builds the world and schedules the first arrival.
    pub fn build(self) -> World {
        let mut world = World::new();
        build_scenario(&mut world, &self.config).expect("test config should validate");
        initialize_simulation(&mut world);
        world
    }
}
