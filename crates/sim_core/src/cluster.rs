//! Cluster state and admission policy.
//!
//! The cluster owns the live pod list (creation order), the shared network
//! container, the single scale-up slot, and the request counters. Admission
//! is first-fit on CPU, followed by a memory-pressure guard that evicts the
//! chosen pod instead of serving the request.

use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

use crate::clock::SimTime;
use crate::ecs::{Pod, PodId, RequestProfile};
use crate::resource::{ResourceContainer, ResourceKind};

/// Size of every pod the cluster creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodTemplate {
    pub cpu_limit: u64,
    pub memory_limit: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClusterCounters {
    pub requests_handled: u64,
    pub successful_requests: u64,
    pub rejected_requests: u64,
    pub rejected_for_cpu: u64,
    pub rejected_for_memory: u64,
    /// Admitted requests whose pipeline has not completed yet.
    pub in_flight: u64,
    pub scale_ups_started: u64,
    pub scale_ups_completed: u64,
    pub pods_evicted: u64,
}

impl ClusterCounters {
    /// Every handled request is either resolved or still in flight.
    pub fn is_balanced(&self) -> bool {
        self.successful_requests + self.rejected_requests + self.in_flight
            == self.requests_handled
    }
}

/// Outcome of admission for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Serve the request on this pod.
    Serve { pod: Entity },
    /// No pod had enough CPU. `scale_up_started` is false when a scale-up
    /// was already pending.
    RejectedForCpu { scale_up_started: bool },
    /// The candidate would cross its memory threshold and was removed.
    EvictedForMemory { pod: Entity },
}

#[derive(Debug, Resource)]
pub struct Cluster {
    pods: Vec<Entity>,
    network: ResourceContainer,
    template: PodTemplate,
    scaling_time: SimTime,
    scaling_in_progress: bool,
    next_pod_id: u64,
    peak_pods: usize,
    counters: ClusterCounters,
}

impl Cluster {
    pub fn new(network_limit: u64, template: PodTemplate, scaling_time: SimTime) -> Self {
        Self {
            pods: Vec::new(),
            network: ResourceContainer::full(ResourceKind::Network, network_limit),
            template,
            scaling_time,
            scaling_in_progress: false,
            next_pod_id: 0,
            peak_pods: 0,
            counters: ClusterCounters::default(),
        }
    }

    /// Live pods in creation order.
    pub fn live_pods(&self) -> &[Entity] {
        &self.pods
    }

    pub fn network(&self) -> &ResourceContainer {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut ResourceContainer {
        &mut self.network
    }

    pub fn template(&self) -> PodTemplate {
        self.template
    }

    pub fn scaling_time(&self) -> SimTime {
        self.scaling_time
    }

    pub fn scaling_in_progress(&self) -> bool {
        self.scaling_in_progress
    }

    pub fn counters(&self) -> ClusterCounters {
        self.counters
    }

    pub fn peak_pods(&self) -> usize {
        self.peak_pods
    }

    /// Builds the next pod from the template with a fresh id.
    pub fn allocate_pod(&mut self) -> Pod {
        self.next_pod_id += 1;
        Pod::new(
            PodId(self.next_pod_id),
            self.template.cpu_limit,
            self.template.memory_limit,
        )
    }

    /// Appends a spawned pod entity to the end of the live list.
    pub fn register_pod(&mut self, pod: Entity) {
        self.pods.push(pod);
        self.peak_pods = self.peak_pods.max(self.pods.len());
    }

    /// Delists a pod. Pipelines already running against it are untouched.
    pub fn remove_pod(&mut self, pod: Entity) -> bool {
        match self.pods.iter().position(|live| *live == pod) {
            Some(index) => {
                self.pods.remove(index);
                true
            }
            None => false,
        }
    }

    /// First live pod, in creation order, whose available CPU covers the demand.
    pub fn select_candidate<'p>(
        &self,
        cpu_demand: u64,
        lookup: impl Fn(Entity) -> Option<&'p Pod>,
    ) -> Option<Entity> {
        self.pods.iter().copied().find(|entity| {
            lookup(*entity)
                .map(|pod| pod.cpu.level() >= cpu_demand)
                .unwrap_or(false)
        })
    }

    /// Runs admission for one request, updating counters, the pod list and
    /// the scale-up slot. The caller applies the scheduling side effects.
    pub fn admit<'p>(
        &mut self,
        profile: &RequestProfile,
        lookup: impl Fn(Entity) -> Option<&'p Pod>,
    ) -> Admission {
        self.counters.requests_handled += 1;

        let Some(candidate) = self.select_candidate(profile.cpu_demand, &lookup) else {
            self.counters.rejected_requests += 1;
            self.counters.rejected_for_cpu += 1;
            let scale_up_started = self.begin_scale_up();
            return Admission::RejectedForCpu { scale_up_started };
        };

        let over_threshold = lookup(candidate)
            .map(|pod| pod.exceeds_memory_threshold(profile.memory_demand))
            .unwrap_or(false);
        if over_threshold {
            self.counters.rejected_requests += 1;
            self.counters.rejected_for_memory += 1;
            self.counters.pods_evicted += 1;
            self.remove_pod(candidate);
            return Admission::EvictedForMemory { pod: candidate };
        }

        self.counters.in_flight += 1;
        Admission::Serve { pod: candidate }
    }

    /// Claims the single scale-up slot. Returns false if one is already pending.
    pub fn begin_scale_up(&mut self) -> bool {
        if self.scaling_in_progress {
            return false;
        }
        self.scaling_in_progress = true;
        self.counters.scale_ups_started += 1;
        true
    }

    /// Registers the pod created by the pending scale-up and frees the slot.
    pub fn complete_scale_up(&mut self, pod: Entity) {
        self.register_pod(pod);
        self.scaling_in_progress = false;
        self.counters.scale_ups_completed += 1;
    }

    pub fn record_success(&mut self) {
        self.counters.in_flight = self.counters.in_flight.saturating_sub(1);
        self.counters.successful_requests += 1;
    }
}
