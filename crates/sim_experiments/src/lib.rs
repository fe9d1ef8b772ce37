//! Parallel capacity-planning experiments over pod cluster simulations.
//!
//! This crate runs many simulations in parallel with varying cluster and
//! workload parameters, extracts per-run metrics, and scores the runs so the
//! best configuration can be picked.
//!
//! # Quick Start
//!
//! ```no_run
//! use sim_experiments::{ParameterSpace, run_parallel_experiments, CapacityWeights, find_best_result_index};
//!
//! let space = ParameterSpace::grid()
//!     .total_initial_pods(vec![1, 2, 4])
//!     .scaling_time(vec![5.0, 10.0])
//!     .request_interval(vec![0.5, 1.0]);
//!
//! let parameter_sets = space.generate();
//! let results = run_parallel_experiments(&parameter_sets, None).expect("experiments");
//!
//! let weights = CapacityWeights::default();
//! let best_idx = find_best_result_index(&results, &weights).unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`parameters`]: Parameter variation framework (grid search, random sampling)
//! - [`parameter_spaces`]: Ready-made spaces
//! - [`runner`]: Parallel simulation execution using rayon
//! - [`metrics`]: Metrics extraction from finished runs
//! - [`capacity`]: Capacity score calculation
//! - [`export`]: Result export to Parquet/JSON/CSV

pub mod capacity;
pub mod export;
pub mod metrics;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;

pub use capacity::{calculate_capacity_scores, CapacityWeights};
pub use export::{
    export_samples_to_csv, export_to_csv, export_to_json, export_to_parquet,
    find_best_parameters, find_best_result_index,
};
pub use metrics::SimulationResult;
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_single_simulation, ExperimentError};
