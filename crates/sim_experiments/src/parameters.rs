//! Parameter variation framework for exploring cluster capacity settings.
//!
//! This module provides tools for defining parameter spaces and generating
//! parameter sets for parallel experimentation. Supports grid search and
//! random sampling strategies.

mod combinations;
mod sampling;
#[cfg(test)]
mod tests;

use serde::Serialize;
use sim_core::scenario::SimulationConfig;

use combinations::ParameterVariations;

/// A single configuration for a simulation run.
///
/// Wraps `SimulationConfig` with experiment metadata for tracking and
/// reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSet {
    pub config: SimulationConfig,
    /// Unique experiment ID for this parameter configuration.
    pub experiment_id: String,
    /// Run ID within the experiment (for multiple runs with same params).
    pub run_id: usize,
    /// Seed used for this run.
    pub seed: u64,
}

impl ParameterSet {
    pub fn new(config: SimulationConfig, experiment_id: String, run_id: usize, seed: u64) -> Self {
        Self {
            config,
            experiment_id,
            run_id,
            seed,
        }
    }

    /// The configuration with this set's seed applied.
    pub fn simulation_config(&self) -> SimulationConfig {
        self.config.clone().with_seed(self.seed)
    }
}

/// Defines a parameter space for exploration.
///
/// Dimensions left empty take their value from the base configuration.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    base: SimulationConfig,
    pod_cpu_limits: Vec<u64>,
    pod_memory_limits: Vec<u64>,
    initial_pods: Vec<usize>,
    cpu_demands: Vec<u64>,
    memory_demands: Vec<u64>,
    request_intervals: Vec<f64>,
    scaling_times: Vec<f64>,
    network_limits: Vec<u64>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self {
            base: SimulationConfig::default(),
            pod_cpu_limits: Vec::new(),
            pod_memory_limits: Vec::new(),
            initial_pods: Vec::new(),
            cpu_demands: Vec::new(),
            memory_demands: Vec::new(),
            request_intervals: Vec::new(),
            scaling_times: Vec::new(),
            network_limits: Vec::new(),
        }
    }

    /// Start a grid search space.
    pub fn grid() -> Self {
        Self::new()
    }

    pub fn pod_cpu_limit(mut self, limits: Vec<u64>) -> Self {
        self.pod_cpu_limits = limits;
        self
    }

    pub fn pod_memory_limit(mut self, limits: Vec<u64>) -> Self {
        self.pod_memory_limits = limits;
        self
    }

    pub fn total_initial_pods(mut self, counts: Vec<usize>) -> Self {
        self.initial_pods = counts;
        self
    }

    pub fn cpu_demand(mut self, demands: Vec<u64>) -> Self {
        self.cpu_demands = demands;
        self
    }

    pub fn memory_demand(mut self, demands: Vec<u64>) -> Self {
        self.memory_demands = demands;
        self
    }

    pub fn request_interval(mut self, intervals: Vec<f64>) -> Self {
        self.request_intervals = intervals;
        self
    }

    pub fn scaling_time(mut self, times: Vec<f64>) -> Self {
        self.scaling_times = times;
        self
    }

    pub fn network_limit(mut self, limits: Vec<u64>) -> Self {
        self.network_limits = limits;
        self
    }

    /// Set base configuration (used for unspecified dimensions).
    pub fn with_base(mut self, base: SimulationConfig) -> Self {
        self.base = base;
        self
    }

    /// Generate all parameter sets using grid search (Cartesian product).
    ///
    /// Combinations that fail validation (a demand above its capacity, for
    /// instance) are dropped; experiment ids stay dense over the kept sets.
    pub fn generate(&self) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);
        variations
            .generate_combinations()
            .into_iter()
            .map(|combo| combo.apply(&self.base))
            .filter(|config| config.validate().is_ok())
            .enumerate()
            .map(|(experiment_id, config)| {
                let seed = (experiment_id as u64).wrapping_mul(0x9e3779b9);
                ParameterSet::new(config, format!("exp_{experiment_id}"), 0, seed)
            })
            .collect()
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}
