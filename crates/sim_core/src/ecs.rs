use std::fmt;

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::resource::{ResourceContainer, ResourceKind};

/// Fraction of a pod's memory limit above which admission evicts the pod.
pub const MEMORY_EVICTION_RATIO: f64 = 0.5;

/// Pod identifier. Strictly increasing over a run and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PodId(pub u64);

impl fmt::Display for PodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pod-{}", self.0)
    }
}

/// Resource needs and delays of one arriving request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestProfile {
    pub memory_demand: u64,
    pub cpu_demand: u64,
    pub network_demand: u64,
    pub request_duration: SimTime,
    pub network_latency_mean: SimTime,
}

/// A worker with private CPU (available amount) and memory (used amount).
#[derive(Debug, Clone, Component)]
pub struct Pod {
    pub id: PodId,
    pub cpu: ResourceContainer,
    pub memory: ResourceContainer,
    pub memory_limit: u64,
}

impl Pod {
    pub fn new(id: PodId, cpu_limit: u64, memory_limit: u64) -> Self {
        Self {
            id,
            cpu: ResourceContainer::full(ResourceKind::Cpu, cpu_limit),
            memory: ResourceContainer::empty(ResourceKind::Memory, memory_limit),
            memory_limit,
        }
    }

    /// Whether serving `memory_demand` more would cross the eviction threshold.
    pub fn exceeds_memory_threshold(&self, memory_demand: u64) -> bool {
        let projected = self.memory.level().saturating_add(memory_demand);
        projected as f64 > self.memory_limit as f64 * MEMORY_EVICTION_RATIO
    }
}

/// Marks a pod removed from the live list for memory pressure.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Evicted {
    pub at: SimTime,
}

/// Next step a pipeline performs when it is stepped or resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    AcquireCpu,
    RaiseMemory,
    AcquireNetwork,
    NetworkLatency,
    Processing,
    Release,
    Finished,
}

/// One admitted request running against a pod.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Pipeline {
    pub pod: Entity,
    pub profile: RequestProfile,
    pub stage: PipelineStage,
    pub admitted_at: SimTime,
}

impl Pipeline {
    pub fn new(pod: Entity, profile: RequestProfile, admitted_at: SimTime) -> Self {
        Self {
            pod,
            profile,
            stage: PipelineStage::AcquireCpu,
            admitted_at,
        }
    }
}
