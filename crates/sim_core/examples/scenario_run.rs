//! Default scenario: two pods, one request per time unit, 50 time units.
//!
//! Run with: cargo run -p sim_core --example scenario_run --release

use sim_core::{Simulation, SimulationConfig};

fn main() {
    let config = SimulationConfig::default().with_seed(42);
    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = simulation.run_to_end() {
        eprintln!("simulation failed: {err}");
        std::process::exit(1);
    }

    let counters = simulation.cluster().counters();
    println!("=== Default Scenario ===\n");
    println!("Arrivals:            {}", simulation.arrivals());
    println!("Handled:             {}", counters.requests_handled);
    println!("Succeeded:           {}", counters.successful_requests);
    println!("Rejected:            {}", counters.rejected_requests);
    println!("  - cpu:             {}", counters.rejected_for_cpu);
    println!("  - memory:          {}", counters.rejected_for_memory);
    println!("Pods evicted:        {}", counters.pods_evicted);
    println!("Scale-ups completed: {}", counters.scale_ups_completed);
    println!("Peak pods:           {}", simulation.cluster().peak_pods());

    println!("\n--- Last samples ---");
    let samples = simulation.samples();
    for sample in samples.iter().skip(samples.len().saturating_sub(5)) {
        let pods: Vec<String> = sample
            .pods
            .iter()
            .map(|p| format!("{}(cpu {}, mem {})", p.id, p.cpu_level, p.memory_level))
            .collect();
        println!(
            "t={:>6.2} ok={:>3} fail={:>3} {}",
            sample.timestamp,
            sample.successes,
            sample.failures,
            pods.join(" ")
        );
    }
}
