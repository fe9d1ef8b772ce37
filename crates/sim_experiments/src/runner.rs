//! Parallel simulation execution using rayon.
//!
//! This module provides functions to run single simulations and execute
//! multiple simulations in parallel for parameter sweeps.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sim_core::{SimResult, Simulation};
use thiserror::Error;
use tracing::{debug, info};

use crate::metrics::{extract_metrics, SimulationResult};
use crate::parameters::ParameterSet;

/// Failure of an experiment batch.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("simulation {experiment_id} failed: {source}")]
    Simulation {
        experiment_id: String,
        #[source]
        source: sim_core::SimError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Run a single simulation with the given parameter set.
///
/// Builds a fresh simulation, runs it to completion, and extracts metrics.
pub fn run_single_simulation(param_set: &ParameterSet) -> SimResult<SimulationResult> {
    let config = param_set.simulation_config();
    let mut simulation = Simulation::new(&config)?;
    let steps = simulation.run_to_end()?;
    debug!(
        experiment_id = %param_set.experiment_id,
        run_id = param_set.run_id,
        steps,
        "simulation run complete"
    );
    Ok(extract_metrics(&simulation, &config))
}

/// Run multiple simulations in parallel with a progress bar.
///
/// Results are returned in the same order as the input parameter sets.
pub fn run_parallel_experiments(
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
) -> Result<Vec<SimulationResult>, ExperimentError> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, true)
}

/// Run multiple simulations in parallel with optional progress bar.
///
/// `num_threads` of `None` uses rayon's default. The first failing run
/// aborts the batch.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: &[ParameterSet],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationResult>, ExperimentError> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    info!(runs = total, threads = pool.current_num_threads(), "starting experiments");

    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_simulation(param_set).map_err(|source| {
                    ExperimentError::Simulation {
                        experiment_id: param_set.experiment_id.clone(),
                        source,
                    }
                });
                if let Some(progress_bar) = &pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()
    });

    if let Some(progress_bar) = &pb {
        progress_bar.finish_with_message("Completed");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;

    #[test]
    fn test_single_simulation() {
        let sets = ParameterSpace::grid().total_initial_pods(vec![2]).generate();
        let result = run_single_simulation(&sets[0]).expect("run");

        assert_eq!(result.requests_handled, 51);
        assert!(result.sample_count > 0);
    }

    #[test]
    fn test_parallel_experiments_preserve_order() {
        let sets = ParameterSpace::grid()
            .total_initial_pods(vec![1, 3])
            .request_interval(vec![1.0, 5.0])
            .generate();
        let results = run_parallel_experiments_with_progress(&sets, Some(2), false).expect("run");

        assert_eq!(results.len(), 4);
        for (set, result) in sets.iter().zip(&results) {
            let expected = run_single_simulation(set).expect("run");
            assert_eq!(result, &expected);
        }
        // Interval 5.0 sees arrivals at 0, 5, ..., 50.
        assert_eq!(results[1].arrivals, 11);
    }
}
