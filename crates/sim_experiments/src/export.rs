//! Result export and analysis utilities.
//!
//! This module provides functions to export experiment results to Parquet,
//! JSON and CSV, and to find the best parameter combination by capacity score.

use std::path::Path;

use sim_core::telemetry::Sample;

use crate::capacity::CapacityWeights;
use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export simulation results to Parquet format, one row per run.
///
/// # Errors
///
/// Returns an error if `results` is empty or if file creation or Parquet writing fails.
pub fn export_to_parquet(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    parquet::export_to_parquet_impl(results, file)
}

/// Export simulation results to a JSON array.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export simulation results with parameters to CSV format.
///
/// Parameters and results are paired by index (results[i] corresponds to parameter_sets[i]).
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails, or if results and parameter_sets lengths don't match.
pub fn export_to_csv(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Export one run's samples to CSV, one row per live pod per sample.
pub fn export_samples_to_csv(
    samples: &[Sample],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::export_samples_to_csv_impl(samples, file)
}

/// Find the parameter set with the highest capacity score.
///
/// Returns `None` if inputs are empty or mismatched.
pub fn find_best_parameters<'a>(
    results: &[SimulationResult],
    parameter_sets: &'a [ParameterSet],
    weights: &CapacityWeights,
) -> Option<&'a ParameterSet> {
    ranking::find_best_parameters_impl(results, parameter_sets, weights)
}

/// Index of the result with the highest capacity score, or `None` if results are empty.
pub fn find_best_result_index(
    results: &[SimulationResult],
    weights: &CapacityWeights,
) -> Option<usize> {
    ranking::find_best_index_by_score(results, weights)
}
