//! Pre-defined parameter space configurations for experimentation.

use crate::ParameterSpace;

/// A handful of runs for quick checks.
pub fn minimal_space() -> ParameterSpace {
    ParameterSpace::grid()
        .total_initial_pods(vec![1, 2])
        .request_interval(vec![0.5, 1.0])
}

/// How scale-up delay and starting capacity interact under steady load.
pub fn scaling_space() -> ParameterSpace {
    ParameterSpace::grid()
        .total_initial_pods(vec![1, 2, 4, 8])
        .scaling_time(vec![1.0, 5.0, 10.0, 20.0])
        .request_interval(vec![0.25, 0.5, 1.0])
}

/// Pod sizing against request demands and arrival rate.
pub fn capacity_space() -> ParameterSpace {
    ParameterSpace::grid()
        .pod_cpu_limit(vec![500, 1000, 2000])
        .pod_memory_limit(vec![1000, 2000, 4000])
        .cpu_demand(vec![100, 200, 400])
        .memory_demand(vec![100, 300, 600])
        .request_interval(vec![0.5, 1.0])
        .network_limit(vec![200, 1000])
}
