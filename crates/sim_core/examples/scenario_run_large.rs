//! Large scenario: 20 requests per time unit for 10,000 time units.
//!
//! Reports throughput of the event loop.
//!
//! Run with: cargo run -p sim_core --example scenario_run_large --release

use std::time::Instant;

use sim_core::{Simulation, SimulationConfig};

fn main() {
    const RUNTIME: f64 = 10_000.0;
    const INTERVAL: f64 = 0.05;

    println!("=== Large Scenario ({RUNTIME} time units, interval {INTERVAL}) ===\n");

    let config = SimulationConfig::default()
        .with_seed(42)
        .with_runtime(RUNTIME)
        .with_request_interval(INTERVAL)
        .with_initial_pods(8)
        .with_pod_limits(2000, 4000)
        .with_scaling_time(5.0);

    let build_start = Instant::now();
    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    println!("Build time: {:.3}s", build_start.elapsed().as_secs_f64());

    let run_start = Instant::now();
    let steps = match simulation.run_to_end() {
        Ok(steps) => steps,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    };
    let run_elapsed = run_start.elapsed();

    let counters = simulation.cluster().counters();
    println!("\n--- Simulation Results ---");
    println!("Steps executed:      {steps}");
    println!("Simulation time:     {:.2}", simulation.now());
    println!("Wall-clock time:     {:.2}s", run_elapsed.as_secs_f64());
    println!(
        "Events per second:   {:.0}",
        steps as f64 / run_elapsed.as_secs_f64()
    );

    println!("\n--- Outcomes ---");
    println!("Succeeded:           {}", counters.successful_requests);
    println!("Rejected:            {}", counters.rejected_requests);
    println!("Pods evicted:        {}", counters.pods_evicted);
    println!("Scale-ups completed: {}", counters.scale_ups_completed);
    println!("Peak pods:           {}", simulation.cluster().peak_pods());
    println!("Samples:             {}", simulation.samples().len());
}
