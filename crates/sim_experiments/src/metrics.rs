//! Metrics extraction from completed simulations.

use serde::Serialize;
use sim_core::scenario::SimulationConfig;
use sim_core::telemetry::Sample;
use sim_core::Simulation;

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub arrivals: u64,
    pub requests_handled: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Successes over resolved requests; in-flight requests are not counted.
    pub success_rate: f64,
    pub rejected_for_cpu: u64,
    pub rejected_for_memory: u64,
    pub pods_evicted: u64,
    pub scale_ups_started: u64,
    pub scale_ups_completed: u64,
    pub final_pods: usize,
    pub peak_pods: usize,
    /// Live pods averaged over samples.
    pub mean_live_pods: f64,
    /// Share of live pod CPU in use, averaged over samples.
    pub mean_cpu_utilization: f64,
    pub sample_count: usize,
    pub events_processed: u64,
}

impl SimulationResult {
    /// Mean over samples of `f`, or zero with no samples.
    fn sample_mean(samples: &[Sample], f: impl Fn(&Sample) -> f64) -> f64 {
        if samples.is_empty() {
            0.0
        } else {
            samples.iter().map(f).sum::<f64>() / samples.len() as f64
        }
    }
}

/// Fraction of the sampled pods' CPU that is taken by running requests.
fn cpu_utilization(sample: &Sample, pod_cpu_limit: u64) -> f64 {
    if sample.pods.is_empty() || pod_cpu_limit == 0 {
        return 0.0;
    }
    let capacity = sample.pods.len() as f64 * pod_cpu_limit as f64;
    let available: u64 = sample.pods.iter().map(|p| p.cpu_level).sum();
    1.0 - available as f64 / capacity
}

/// Extract metrics from a simulation that has run to completion.
pub fn extract_metrics(simulation: &Simulation, config: &SimulationConfig) -> SimulationResult {
    let cluster = simulation.cluster();
    let counters = cluster.counters();
    let samples = simulation.samples();

    let resolved = counters.successful_requests + counters.rejected_requests;
    let success_rate = if resolved == 0 {
        0.0
    } else {
        counters.successful_requests as f64 / resolved as f64
    };

    SimulationResult {
        arrivals: simulation.arrivals(),
        requests_handled: counters.requests_handled,
        successful_requests: counters.successful_requests,
        failed_requests: counters.rejected_requests,
        success_rate,
        rejected_for_cpu: counters.rejected_for_cpu,
        rejected_for_memory: counters.rejected_for_memory,
        pods_evicted: counters.pods_evicted,
        scale_ups_started: counters.scale_ups_started,
        scale_ups_completed: counters.scale_ups_completed,
        final_pods: cluster.live_pods().len(),
        peak_pods: cluster.peak_pods(),
        mean_live_pods: SimulationResult::sample_mean(samples, |s| s.pods.len() as f64),
        mean_cpu_utilization: SimulationResult::sample_mean(samples, |s| {
            cpu_utilization(s, config.pod_cpu_limit)
        }),
        sample_count: samples.len(),
        events_processed: simulation.metrics().events_processed,
    }
}
