//! Shared fixtures for unit and downstream tests.

use bevy_ecs::prelude::World;

use crate::ecs::RequestProfile;
use crate::scenario::{build_scenario, SimulationConfig};

/// Seed used by every fixture so runs are reproducible.
pub const TEST_SEED: u64 = 42;

/// Default configuration with a fixed seed.
pub fn test_config() -> SimulationConfig {
    SimulationConfig::default().with_seed(TEST_SEED)
}

/// The request profile of [test_config].
pub fn test_profile() -> RequestProfile {
    test_config().request_profile()
}

/// A world holding every scenario resource and the initial pods, with no
/// events scheduled yet.
///
/// # Panics
///
/// Panics if `config` does not validate.
pub fn build_test_world(config: &SimulationConfig) -> World {
    let mut world = World::new();
    build_scenario(&mut world, config).expect("test config should validate");
    world
}
