use bevy_ecs::prelude::{Resource, World};
use tracing::debug;

use crate::clock::{SimTime, SimulationClock};
use crate::cluster::{Cluster, PodTemplate};
use crate::distributions::LatencyJitter;
use crate::error::{ConfigError, SimFault};
use crate::generator::RequestGenerator;
use crate::profiling::EventMetrics;
use crate::scenario::params::SimulationConfig;
use crate::telemetry::{PendingSamples, SimSamples};

/// Last virtual time at which events are processed (inclusive).
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTime(pub SimTime);

/// Validates `config` and inserts every resource a run needs, including the
/// initial pods. Nothing is inserted when validation fails.
pub fn build_scenario(world: &mut World, config: &SimulationConfig) -> Result<(), ConfigError> {
    config.validate()?;

    let template = PodTemplate {
        cpu_limit: config.pod_cpu_limit,
        memory_limit: config.pod_memory_limit,
    };
    let mut cluster = Cluster::new(config.network_limit, template, config.scaling_time);
    for _ in 0..config.total_initial_pods {
        let pod = cluster.allocate_pod();
        let entity = world.spawn(pod).id();
        cluster.register_pod(entity);
    }
    debug!(pods = config.total_initial_pods, "initial pods spawned");

    world.insert_resource(cluster);
    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimulationEndTime(config.runtime));
    world.insert_resource(RequestGenerator::new(
        config.request_profile(),
        config.request_interval,
    ));
    world.insert_resource(LatencyJitter::new(config.seed));
    world.insert_resource(SimSamples::default());
    world.insert_resource(PendingSamples::default());
    world.insert_resource(SimFault::default());
    world.insert_resource(EventMetrics::default());
    Ok(())
}
