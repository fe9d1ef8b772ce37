//! Example: capacity sweep over initial pods, scale-up delay and load.
//!
//! 1. Select a pre-defined parameter space
//! 2. Run the simulations in parallel
//! 3. Score them and print the best configuration
//! 4. Export results to CSV
//!
//! To use a different parameter space, change the function call in main().

use sim_experiments::{
    export_to_csv, find_best_parameters, find_best_result_index, run_parallel_experiments,
    CapacityWeights,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting capacity sweep...");

    // - minimal_space(): Quick testing
    // - scaling_space(): Initial pods vs scale-up delay
    // - capacity_space(): Pod sizing vs demands
    let space = sim_experiments::parameter_spaces::scaling_space();

    let parameter_sets = space.generate();
    println!("Generated {} parameter combinations", parameter_sets.len());

    let results = run_parallel_experiments(&parameter_sets, None)?;
    println!("Completed {} simulations", results.len());

    let weights = CapacityWeights::default();
    let best_idx = find_best_result_index(&results, &weights).ok_or("No results to analyze")?;

    println!("\n=== Best Configuration ===");
    let best_result = &results[best_idx];
    println!("Success rate: {:.2}%", best_result.success_rate * 100.0);
    println!("Mean live pods: {:.2}", best_result.mean_live_pods);
    println!("Pods evicted: {}", best_result.pods_evicted);
    println!("Scale-ups: {}", best_result.scale_ups_completed);

    if let Some(best) = find_best_parameters(&results, &parameter_sets, &weights) {
        println!("\n=== Best Parameters ===");
        println!("Initial pods: {}", best.config.total_initial_pods);
        println!("Scaling time: {}", best.config.scaling_time);
        println!("Request interval: {}", best.config.request_interval);
    }

    export_to_csv(&results, &parameter_sets, "capacity_results.csv")?;
    println!("\nExported to capacity_results.csv");

    Ok(())
}
