use bevy_ecs::prelude::{Commands, Query, Res, ResMut};
use tracing::{debug, info, warn};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::cluster::{Admission, Cluster};
use crate::ecs::{Evicted, Pipeline, Pod};
use crate::telemetry::PendingSamples;

/// Admission for one arrival: serve on the first pod with enough CPU, evict
/// that pod under memory pressure, or reject and scale up when CPU is
/// exhausted everywhere.
pub fn handle_request_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut cluster: ResMut<Cluster>,
    mut pending: ResMut<PendingSamples>,
    pods: Query<&Pod>,
) {
    let Some(EventSubject::Request(profile)) = event.0.subject else {
        return;
    };
    let now = clock.now();

    match cluster.admit(&profile, |entity| pods.get(entity).ok()) {
        Admission::Serve { pod } => {
            let pipeline = commands.spawn(Pipeline::new(pod, profile, now)).id();
            clock.schedule_at(
                now,
                EventKind::PipelineResume,
                Some(EventSubject::Pipeline(pipeline)),
            );
            if let Ok(pod) = pods.get(pod) {
                debug!(now, pod = %pod.id, cpu_level = pod.cpu.level(), "request admitted");
            }
        }
        Admission::RejectedForCpu { scale_up_started } => {
            if scale_up_started {
                let scaling_time = cluster.scaling_time();
                clock.schedule_in(scaling_time, EventKind::ScaleUpComplete, None);
                info!(now, scaling_time, "no pod with sufficient cpu, scaling up");
            } else {
                debug!(now, "no pod with sufficient cpu and scale-up already pending");
            }
            pending.request();
        }
        Admission::EvictedForMemory { pod } => {
            commands.entity(pod).insert(Evicted { at: now });
            if let Ok(pod) = pods.get(pod) {
                warn!(
                    now,
                    pod = %pod.id,
                    memory_level = pod.memory.level(),
                    memory_demand = profile.memory_demand,
                    "memory threshold exceeded, evicting pod"
                );
            }
            pending.request();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Entity, Schedule, World};

    use crate::clock::Event;
    use crate::test_helpers::{build_test_world, test_config, test_profile};

    fn admit_one(world: &mut World) {
        let profile = test_profile();
        world.insert_resource(CurrentEvent(Event {
            timestamp: 0.0,
            seq: 0,
            kind: EventKind::HandleRequest,
            subject: Some(EventSubject::Request(profile)),
        }));
        let mut schedule = Schedule::default();
        schedule.add_systems(handle_request_system);
        schedule.run(world);
    }

    #[test]
    fn admitted_request_spawns_pipeline_on_first_pod() {
        let mut world = build_test_world(&test_config());
        let first_pod = world.resource::<Cluster>().live_pods()[0];

        admit_one(&mut world);

        let pipelines: Vec<Pipeline> = world.query::<&Pipeline>().iter(&world).copied().collect();
        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].pod, first_pod);

        let resume = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("pipeline resume");
        assert_eq!(resume.kind, EventKind::PipelineResume);
        assert!(!world.resource::<PendingSamples>().is_pending());
    }

    #[test]
    fn no_pods_rejects_and_schedules_scale_up() {
        let mut world = build_test_world(&test_config().with_initial_pods(0));

        admit_one(&mut world);

        let cluster = world.resource::<Cluster>();
        assert!(cluster.scaling_in_progress());
        assert_eq!(cluster.counters().rejected_for_cpu, 1);
        let scale_up = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("scale up");
        assert_eq!(scale_up.kind, EventKind::ScaleUpComplete);
        assert_eq!(scale_up.timestamp, test_config().scaling_time);
        assert!(world.resource::<PendingSamples>().is_pending());
    }

    #[test]
    fn memory_pressure_marks_pod_evicted() {
        let config = test_config().with_demands(200, 600, 50);
        let mut world = build_test_world(&config);
        let first_pod: Entity = world.resource::<Cluster>().live_pods()[0];
        world.insert_resource(CurrentEvent(Event {
            timestamp: 0.0,
            seq: 0,
            kind: EventKind::HandleRequest,
            subject: Some(EventSubject::Request(config.request_profile())),
        }));
        let mut schedule = Schedule::default();
        schedule.add_systems(handle_request_system);
        schedule.run(&mut world);

        assert!(world.get::<Evicted>(first_pod).is_some());
        assert_eq!(world.resource::<Cluster>().live_pods().len(), 1);
        assert!(world.query::<&Pipeline>().iter(&world).next().is_none());
    }
}
