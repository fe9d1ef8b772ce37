#![allow(dead_code)]

use std::collections::HashSet;

use bevy_ecs::prelude::{Entity, World};
use sim_core::cluster::Cluster;
use sim_core::ecs::{Evicted, Pod, PodId};
use sim_core::resource::ResourceContainer;

/// Checks the cluster invariants after every processed event.
///
/// Takes `&World` so it can run inside a runner hook; pods are found through
/// the cluster's list plus every entity seen in it before.
#[derive(Debug, Default)]
pub struct InvariantChecker {
    known_pods: Vec<Entity>,
    seen_ids: HashSet<PodId>,
    removed: HashSet<PodId>,
    highest_id: u64,
    pub events_checked: usize,
}

impl InvariantChecker {
    pub fn check(&mut self, world: &World) {
        self.events_checked += 1;
        let cluster = world.resource::<Cluster>();

        for entity in cluster.live_pods() {
            if !self.known_pods.contains(entity) {
                self.known_pods.push(*entity);
            }
        }

        assert_within_capacity(cluster.network(), "network");
        for entity in &self.known_pods {
            let pod = world.get::<Pod>(*entity).expect("pod entity outlives removal");
            assert_within_capacity(&pod.cpu, "cpu");
            assert_within_capacity(&pod.memory, "memory");

            if !self.seen_ids.contains(&pod.id) {
                assert!(
                    pod.id.0 > self.highest_id,
                    "pod id {} issued after {}",
                    pod.id,
                    self.highest_id
                );
                self.highest_id = pod.id.0;
                self.seen_ids.insert(pod.id);
            }
            if world.get::<Evicted>(*entity).is_some() {
                self.removed.insert(pod.id);
            }
        }

        for entity in cluster.live_pods() {
            let id = world.get::<Pod>(*entity).expect("live pod").id;
            assert!(!self.removed.contains(&id), "removed pod {id} is live again");
        }

        let counters = cluster.counters();
        let pending = counters.scale_ups_started - counters.scale_ups_completed;
        assert!(pending <= 1, "{pending} scale-ups in flight");
        assert_eq!(pending == 1, cluster.scaling_in_progress());
        assert!(counters.is_balanced(), "unbalanced counters: {counters:?}");
    }
}

fn assert_within_capacity(container: &ResourceContainer, name: &str) {
    assert!(
        container.level() <= container.capacity(),
        "{name} level {} above capacity {}",
        container.level(),
        container.capacity()
    );
}
