use sim_core::scenario::SimulationConfig;

use super::ParameterSpace;

/// One point of the parameter space.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParameterCombination {
    pub(super) pod_cpu_limit: u64,
    pub(super) pod_memory_limit: u64,
    pub(super) total_initial_pods: usize,
    pub(super) cpu_demand: u64,
    pub(super) memory_demand: u64,
    pub(super) request_interval: f64,
    pub(super) scaling_time: f64,
    pub(super) network_limit: u64,
}

impl ParameterCombination {
    pub(super) fn apply(&self, base: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            pod_cpu_limit: self.pod_cpu_limit,
            pod_memory_limit: self.pod_memory_limit,
            total_initial_pods: self.total_initial_pods,
            cpu_demand: self.cpu_demand,
            memory_demand: self.memory_demand,
            request_interval: self.request_interval,
            scaling_time: self.scaling_time,
            network_limit: self.network_limit,
            ..base.clone()
        }
    }
}

fn or_base<T: Clone>(values: &[T], base: T) -> Vec<T> {
    if values.is_empty() {
        vec![base]
    } else {
        values.to_vec()
    }
}

/// Every dimension's values, with unspecified ones pinned to the base.
pub(super) struct ParameterVariations {
    pub(super) pod_cpu_limits: Vec<u64>,
    pub(super) pod_memory_limits: Vec<u64>,
    pub(super) initial_pods: Vec<usize>,
    pub(super) cpu_demands: Vec<u64>,
    pub(super) memory_demands: Vec<u64>,
    pub(super) request_intervals: Vec<f64>,
    pub(super) scaling_times: Vec<f64>,
    pub(super) network_limits: Vec<u64>,
}

impl ParameterVariations {
    pub(super) fn from_space(space: &ParameterSpace) -> Self {
        let base = &space.base;
        Self {
            pod_cpu_limits: or_base(&space.pod_cpu_limits, base.pod_cpu_limit),
            pod_memory_limits: or_base(&space.pod_memory_limits, base.pod_memory_limit),
            initial_pods: or_base(&space.initial_pods, base.total_initial_pods),
            cpu_demands: or_base(&space.cpu_demands, base.cpu_demand),
            memory_demands: or_base(&space.memory_demands, base.memory_demand),
            request_intervals: or_base(&space.request_intervals, base.request_interval),
            scaling_times: or_base(&space.scaling_times, base.scaling_time),
            network_limits: or_base(&space.network_limits, base.network_limit),
        }
    }

    /// Cartesian product, with the first dimension varying slowest.
    pub(super) fn generate_combinations(&self) -> Vec<ParameterCombination> {
        let mut combos = Vec::new();
        for &pod_cpu_limit in &self.pod_cpu_limits {
            for &pod_memory_limit in &self.pod_memory_limits {
                for &total_initial_pods in &self.initial_pods {
                    for &cpu_demand in &self.cpu_demands {
                        for &memory_demand in &self.memory_demands {
                            for &request_interval in &self.request_intervals {
                                for &scaling_time in &self.scaling_times {
                                    for &network_limit in &self.network_limits {
                                        combos.push(ParameterCombination {
                                            pod_cpu_limit,
                                            pod_memory_limit,
                                            total_initial_pods,
                                            cpu_demand,
                                            memory_demand,
                                            request_interval,
                                            scaling_time,
                                            network_limit,
                                        });
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        combos
    }

    /// Number of combinations before validation.
    pub(super) fn len(&self) -> usize {
        self.pod_cpu_limits.len()
            * self.pod_memory_limits.len()
            * self.initial_pods.len()
            * self.cpu_demands.len()
            * self.memory_demands.len()
            * self.request_intervals.len()
            * self.scaling_times.len()
            * self.network_limits.len()
    }
}
