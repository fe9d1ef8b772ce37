use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::combinations::{ParameterCombination, ParameterVariations};
use super::{ParameterSet, ParameterSpace};

fn pick<T: Copy>(rng: &mut StdRng, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

impl ParameterSpace {
    /// Generate random parameter sets (Monte Carlo sampling).
    ///
    /// Samples up to `count` unique, valid parameter sets from the space.
    /// Returns fewer when the space has fewer valid points.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut parameter_sets = Vec::new();
        let mut seen = HashSet::new();
        let mut attempts = 0;
        let max_attempts = 10_000.max(variations.len() * 4);

        while parameter_sets.len() < count && attempts < max_attempts {
            attempts += 1;
            let combo = ParameterCombination {
                pod_cpu_limit: pick(&mut rng, &variations.pod_cpu_limits),
                pod_memory_limit: pick(&mut rng, &variations.pod_memory_limits),
                total_initial_pods: pick(&mut rng, &variations.initial_pods),
                cpu_demand: pick(&mut rng, &variations.cpu_demands),
                memory_demand: pick(&mut rng, &variations.memory_demands),
                request_interval: pick(&mut rng, &variations.request_intervals),
                scaling_time: pick(&mut rng, &variations.scaling_times),
                network_limit: pick(&mut rng, &variations.network_limits),
            };

            let combo_key = format!("{combo:?}");
            if !seen.insert(combo_key) {
                continue;
            }
            let config = combo.apply(&self.base);
            if config.validate().is_err() {
                continue;
            }

            let seed_value = seed
                .wrapping_add(parameter_sets.len() as u64)
                .wrapping_mul(0x9e3779b9);
            parameter_sets.push(ParameterSet::new(
                config,
                format!("random_{}", parameter_sets.len()),
                0,
                seed_value,
            ));
        }

        parameter_sets
    }
}
