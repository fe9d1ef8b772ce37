use bevy_ecs::prelude::{Commands, Res, ResMut};
use tracing::info;

use crate::clock::SimulationClock;
use crate::cluster::Cluster;
use crate::telemetry::PendingSamples;

/// Ends the pending scale-up: appends one pod built from the cluster's
/// template and frees the scale-up slot.
pub fn scale_up_system(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut cluster: ResMut<Cluster>,
    mut pending: ResMut<PendingSamples>,
) {
    let pod = cluster.allocate_pod();
    let id = pod.id;
    let entity = commands.spawn(pod).id();
    cluster.complete_scale_up(entity);
    pending.request();
    info!(
        now = clock.now(),
        pod = %id,
        live_pods = cluster.live_pods().len(),
        "scale-up complete"
    );
}
