use serde::{Deserialize, Serialize};

use crate::clock::SimTime;
use crate::ecs::RequestProfile;
use crate::error::ConfigError;

/// Parameters for one simulation run.
///
/// Deserializing from a partial JSON object fills every missing option with
/// its default, so callers only override what they care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Virtual time at which the run stops.
    pub runtime: SimTime,
    pub pod_cpu_limit: u64,
    pub pod_memory_limit: u64,
    pub total_initial_pods: usize,
    /// Capacity of the network shared by all pods.
    pub network_limit: u64,
    pub memory_demand: u64,
    pub cpu_demand: u64,
    pub network_demand: u64,
    pub request_duration: SimTime,
    /// Time between consecutive arrivals.
    pub request_interval: SimTime,
    /// Mean network latency per request.
    pub network_latency: SimTime,
    /// Delay before a scale-up adds its pod.
    pub scaling_time: SimTime,
    /// Seed for latency jitter; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runtime: 50.0,
            pod_cpu_limit: 500,
            pod_memory_limit: 1000,
            total_initial_pods: 2,
            network_limit: 1000,
            memory_demand: 300,
            cpu_demand: 200,
            network_demand: 50,
            request_duration: 1.0,
            request_interval: 1.0,
            network_latency: 1.0,
            scaling_time: 10.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_runtime(mut self, runtime: SimTime) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_request_interval(mut self, interval: SimTime) -> Self {
        self.request_interval = interval;
        self
    }

    pub fn with_scaling_time(mut self, scaling_time: SimTime) -> Self {
        self.scaling_time = scaling_time;
        self
    }

    pub fn with_initial_pods(mut self, pods: usize) -> Self {
        self.total_initial_pods = pods;
        self
    }

    /// Per-pod CPU and memory capacity.
    pub fn with_pod_limits(mut self, cpu_limit: u64, memory_limit: u64) -> Self {
        self.pod_cpu_limit = cpu_limit;
        self.pod_memory_limit = memory_limit;
        self
    }

    /// Per-request CPU, memory and network demand.
    pub fn with_demands(mut self, cpu: u64, memory: u64, network: u64) -> Self {
        self.cpu_demand = cpu;
        self.memory_demand = memory;
        self.network_demand = network;
        self
    }

    /// Processing time and mean network latency of each request.
    pub fn with_delays(mut self, request_duration: SimTime, network_latency: SimTime) -> Self {
        self.request_duration = request_duration;
        self.network_latency = network_latency;
        self
    }

    /// The profile every arrival carries.
    pub fn request_profile(&self) -> RequestProfile {
        RequestProfile {
            memory_demand: self.memory_demand,
            cpu_demand: self.cpu_demand,
            network_demand: self.network_demand,
            request_duration: self.request_duration,
            network_latency_mean: self.network_latency,
        }
    }

    /// Rejects configurations that are meaningless or would block forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_time("runtime", self.runtime)?;
        positive_time("request_interval", self.request_interval)?;
        non_negative_time("request_duration", self.request_duration)?;
        non_negative_time("network_latency", self.network_latency)?;
        non_negative_time("scaling_time", self.scaling_time)?;

        positive_capacity("pod_cpu_limit", self.pod_cpu_limit)?;
        positive_capacity("pod_memory_limit", self.pod_memory_limit)?;
        positive_capacity("network_limit", self.network_limit)?;

        fits("cpu_demand", self.cpu_demand, "pod_cpu_limit", self.pod_cpu_limit)?;
        fits(
            "memory_demand",
            self.memory_demand,
            "pod_memory_limit",
            self.pod_memory_limit,
        )?;
        fits(
            "network_demand",
            self.network_demand,
            "network_limit",
            self.network_limit,
        )
    }
}

fn positive_time(field: &'static str, value: SimTime) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative_time(field: &'static str, value: SimTime) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn positive_capacity(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        })
    }
}

fn fits(
    demand_field: &'static str,
    demand: u64,
    capacity_field: &'static str,
    capacity: u64,
) -> Result<(), ConfigError> {
    if demand <= capacity {
        Ok(())
    } else {
        Err(ConfigError::DemandExceedsCapacity {
            demand_field,
            demand,
            capacity_field,
            capacity,
        })
    }
}
