//! Samples of cluster state captured after admission-handling events.

use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

use crate::clock::SimTime;
use crate::cluster::Cluster;
use crate::ecs::{Pod, PodId};

/// Resource levels of one live pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodStats {
    pub id: PodId,
    /// Available CPU.
    #[serde(rename = "cpu")]
    pub cpu_level: u64,
    /// Memory in use.
    #[serde(rename = "memory")]
    pub memory_level: u64,
}

/// Counters and per-pod levels at one point in virtual time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    #[serde(skip_serializing)]
    pub timestamp: SimTime,
    pub successes: u64,
    pub failures: u64,
    pub pods: Vec<PodStats>,
}

impl Sample {
    /// Snapshot of the cluster's counters and its live pods, in list order.
    pub fn capture<'p>(
        timestamp: SimTime,
        cluster: &Cluster,
        lookup: impl Fn(Entity) -> Option<&'p Pod>,
    ) -> Self {
        let counters = cluster.counters();
        let pods = cluster
            .live_pods()
            .iter()
            .filter_map(|entity| lookup(*entity))
            .map(|pod| PodStats {
                id: pod.id,
                cpu_level: pod.cpu.level(),
                memory_level: pod.memory.level(),
            })
            .collect();
        Self {
            timestamp,
            successes: counters.successful_requests,
            failures: counters.rejected_requests,
            pods,
        }
    }
}

/// Ordered samples recorded during a run.
#[derive(Debug, Default, Resource)]
pub struct SimSamples {
    pub samples: Vec<Sample>,
}

/// Samples requested by event systems, captured once deferred commands
/// (such as a newly spawned pod) have been applied.
#[derive(Debug, Default, Resource)]
pub struct PendingSamples(u32);

impl PendingSamples {
    pub fn request(&mut self) {
        self.0 += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.0 > 0
    }

    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.0)
    }
}
