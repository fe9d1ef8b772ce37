use sim_core::telemetry::Sample;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "experiment_id",
        "run_id",
        "seed",
        "runtime",
        "pod_cpu_limit",
        "pod_memory_limit",
        "total_initial_pods",
        "network_limit",
        "cpu_demand",
        "memory_demand",
        "network_demand",
        "request_duration",
        "request_interval",
        "network_latency",
        "scaling_time",
        "arrivals",
        "requests_handled",
        "successful_requests",
        "failed_requests",
        "success_rate",
        "rejected_for_cpu",
        "rejected_for_memory",
        "pods_evicted",
        "scale_ups_started",
        "scale_ups_completed",
        "final_pods",
        "peak_pods",
        "mean_live_pods",
        "mean_cpu_utilization",
        "sample_count",
        "events_processed",
    ])?;

    for (result, set) in results.iter().zip(parameter_sets) {
        let c = &set.config;
        wtr.write_record([
            set.experiment_id.clone(),
            set.run_id.to_string(),
            set.seed.to_string(),
            c.runtime.to_string(),
            c.pod_cpu_limit.to_string(),
            c.pod_memory_limit.to_string(),
            c.total_initial_pods.to_string(),
            c.network_limit.to_string(),
            c.cpu_demand.to_string(),
            c.memory_demand.to_string(),
            c.network_demand.to_string(),
            c.request_duration.to_string(),
            c.request_interval.to_string(),
            c.network_latency.to_string(),
            c.scaling_time.to_string(),
            result.arrivals.to_string(),
            result.requests_handled.to_string(),
            result.successful_requests.to_string(),
            result.failed_requests.to_string(),
            format!("{:.6}", result.success_rate),
            result.rejected_for_cpu.to_string(),
            result.rejected_for_memory.to_string(),
            result.pods_evicted.to_string(),
            result.scale_ups_started.to_string(),
            result.scale_ups_completed.to_string(),
            result.final_pods.to_string(),
            result.peak_pods.to_string(),
            format!("{:.6}", result.mean_live_pods),
            format!("{:.6}", result.mean_cpu_utilization),
            result.sample_count.to_string(),
            result.events_processed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row per (sample, pod); a sample without live pods gets one row with
/// empty pod columns.
pub(crate) fn export_samples_to_csv_impl(
    samples: &[Sample],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record([
        "sample", "time", "successes", "failures", "pod_id", "cpu", "memory",
    ])?;

    for (index, sample) in samples.iter().enumerate() {
        let prefix = [
            index.to_string(),
            sample.timestamp.to_string(),
            sample.successes.to_string(),
            sample.failures.to_string(),
        ];
        if sample.pods.is_empty() {
            wtr.write_record(prefix.iter().cloned().chain(["".into(), "".into(), "".into()]))?;
            continue;
        }
        for pod in &sample.pods {
            wtr.write_record(prefix.iter().cloned().chain([
                pod.id.0.to_string(),
                pod.cpu_level.to_string(),
                pod.memory_level.to_string(),
            ]))?;
        }
    }

    wtr.flush()?;
    Ok(())
}
