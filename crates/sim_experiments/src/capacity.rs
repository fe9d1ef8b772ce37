//! Capacity score calculation.
//!
//! Combines run metrics into one weighted score so configurations can be
//! ranked: high success rates score well, while pods, evictions and
//! rejections cost points.

use crate::metrics::SimulationResult;

/// Configurable weights for capacity score calculation.
///
/// # Default Weights
///
/// - Success rate: 0.5
/// - Mean live pods: -0.2 (fewer pods for the same work is better)
/// - Evictions: -0.15
/// - CPU rejections: -0.15
#[derive(Debug, Clone, Copy)]
pub struct CapacityWeights {
    pub success_weight: f64,
    pub pod_penalty: f64,
    pub eviction_penalty: f64,
    pub rejection_penalty: f64,
}

impl Default for CapacityWeights {
    fn default() -> Self {
        Self {
            success_weight: 0.5,
            pod_penalty: -0.2,
            eviction_penalty: -0.15,
            rejection_penalty: -0.15,
        }
    }
}

impl CapacityWeights {
    pub fn new(
        success_weight: f64,
        pod_penalty: f64,
        eviction_penalty: f64,
        rejection_penalty: f64,
    ) -> Self {
        Self {
            success_weight,
            pod_penalty,
            eviction_penalty,
            rejection_penalty,
        }
    }
}

/// Normalize a metric value to [0, 1] range.
///
/// Uses min-max normalization: `(value - min) / (max - min)`.
/// If min == max, returns 0.5.
fn normalize_metric(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

fn min_max(results: &[SimulationResult], metric: impl Fn(&SimulationResult) -> f64) -> (f64, f64) {
    results
        .iter()
        .map(metric)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
}

/// Calculate capacity scores for all simulation results.
///
/// Normalizes metrics across all results and calculates weighted scores.
/// Higher scores indicate better capacity choices.
///
/// Returns scores in the same order as the input results.
pub fn calculate_capacity_scores(
    results: &[SimulationResult],
    weights: &CapacityWeights,
) -> Vec<f64> {
    if results.is_empty() {
        return vec![];
    }

    let evictions = |r: &SimulationResult| r.pods_evicted as f64;
    let rejections = |r: &SimulationResult| r.rejected_for_cpu as f64;

    let (success_min, success_max) = min_max(results, |r| r.success_rate);
    let (pods_min, pods_max) = min_max(results, |r| r.mean_live_pods);
    let (evictions_min, evictions_max) = min_max(results, evictions);
    let (rejections_min, rejections_max) = min_max(results, rejections);

    results
        .iter()
        .map(|r| {
            weights.success_weight * normalize_metric(r.success_rate, success_min, success_max)
                + weights.pod_penalty * normalize_metric(r.mean_live_pods, pods_min, pods_max)
                + weights.eviction_penalty
                    * normalize_metric(evictions(r), evictions_min, evictions_max)
                + weights.rejection_penalty
                    * normalize_metric(rejections(r), rejections_min, rejections_max)
        })
        .collect()
}
