//! Stepping API over a built world and schedule, plus the one-shot [run].

use bevy_ecs::prelude::{Schedule, World};
use tracing::info;

use crate::clock::{Event, SimTime, SimulationClock};
use crate::cluster::Cluster;
use crate::ecs::Pod;
use crate::error::SimResult;
use crate::generator::RequestGenerator;
use crate::profiling::EventMetrics;
use crate::runner::{
    initialize_simulation, run_next_event, run_until_empty, run_until_empty_with_hook,
    simulation_schedule,
};
use crate::scenario::{build_scenario, SimulationConfig};
use crate::telemetry::{PodStats, Sample, SimSamples};

/// A configured run that can be advanced one event at a time.
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Builds the world from `config` and schedules the first arrival at time 0.
    pub fn new(config: &SimulationConfig) -> SimResult<Self> {
        let mut world = World::new();
        build_scenario(&mut world, config)?;
        initialize_simulation(&mut world);
        Ok(Self {
            world,
            schedule: simulation_schedule(),
        })
    }

    /// Processes one event. Returns `Ok(false)` once the run is over.
    pub fn step(&mut self) -> SimResult<bool> {
        run_next_event(&mut self.world, &mut self.schedule)
    }

    /// Processes events until none remain within the runtime. Returns the step count.
    pub fn run_to_end(&mut self) -> SimResult<usize> {
        let steps = run_until_empty(&mut self.world, &mut self.schedule, usize::MAX)?;
        self.log_summary(steps);
        Ok(steps)
    }

    /// Like [Simulation::run_to_end], calling `hook` after every processed event.
    pub fn run_with_hook<F>(&mut self, hook: F) -> SimResult<usize>
    where
        F: FnMut(&World, &Event),
    {
        let steps =
            run_until_empty_with_hook(&mut self.world, &mut self.schedule, usize::MAX, hook)?;
        self.log_summary(steps);
        Ok(steps)
    }

    pub fn now(&self) -> SimTime {
        self.world.resource::<SimulationClock>().now()
    }

    pub fn cluster(&self) -> &Cluster {
        self.world.resource::<Cluster>()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.world.resource::<SimSamples>().samples
    }

    pub fn arrivals(&self) -> u64 {
        self.world.resource::<RequestGenerator>().arrivals()
    }

    pub fn metrics(&self) -> &EventMetrics {
        self.world.resource::<EventMetrics>()
    }

    /// Current levels of the live pods, in creation order.
    pub fn live_pods(&self) -> Vec<PodStats> {
        self.cluster()
            .live_pods()
            .iter()
            .filter_map(|entity| self.world.get::<Pod>(*entity))
            .map(|pod| PodStats {
                id: pod.id,
                cpu_level: pod.cpu.level(),
                memory_level: pod.memory.level(),
            })
            .collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Consumes the simulation, returning its samples.
    pub fn into_samples(mut self) -> Vec<Sample> {
        std::mem::take(&mut self.world.resource_mut::<SimSamples>().samples)
    }

    fn log_summary(&self, steps: usize) {
        let counters = self.cluster().counters();
        info!(
            steps,
            now = self.now(),
            handled = counters.requests_handled,
            successes = counters.successful_requests,
            failures = counters.rejected_requests,
            live_pods = self.cluster().live_pods().len(),
            samples = self.samples().len(),
            "simulation finished"
        );
    }
}

/// Runs one simulation to completion and returns its samples in order.
pub fn run(config: &SimulationConfig) -> SimResult<Vec<Sample>> {
    let mut simulation = Simulation::new(config)?;
    simulation.run_to_end()?;
    Ok(simulation.into_samples())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_config;

    #[test]
    fn stepping_advances_virtual_time_monotonically() {
        let mut simulation = Simulation::new(&test_config().with_runtime(5.0)).expect("config");
        let mut last = simulation.now();
        while simulation.step().expect("step") {
            assert!(simulation.now() >= last);
            last = simulation.now();
        }
        assert!(simulation.now() <= 5.0);
        assert!(!simulation.samples().is_empty());
    }

    #[test]
    fn run_rejects_invalid_config() {
        let config = test_config().with_request_interval(-1.0);
        assert!(run(&config).is_err());
    }
}
