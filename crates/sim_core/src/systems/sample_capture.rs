use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::cluster::Cluster;
use crate::ecs::Pod;
use crate::telemetry::{PendingSamples, Sample, SimSamples};

/// Records one sample per pending request from this step's event system.
pub fn capture_sample_system(
    clock: Res<SimulationClock>,
    cluster: Res<Cluster>,
    pods: Query<&Pod>,
    mut pending: ResMut<PendingSamples>,
    mut samples: ResMut<SimSamples>,
) {
    for _ in 0..pending.take() {
        let sample = Sample::capture(clock.now(), &cluster, |entity| pods.get(entity).ok());
        debug!(
            now = clock.now(),
            successes = sample.successes,
            failures = sample.failures,
            live_pods = sample.pods.len(),
            "sample captured"
        );
        samples.samples.push(sample);
    }
}
