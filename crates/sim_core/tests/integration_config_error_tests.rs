mod support;

use sim_core::error::{ConfigError, SimError};
use sim_core::scenario::SimulationConfig;
use sim_core::{run, Simulation};

fn config_error(config: SimulationConfig) -> ConfigError {
    match run(&config) {
        Err(SimError::Configuration(err)) => err,
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn demand_above_pod_capacity_fails_before_running() {
    let err = config_error(SimulationConfig::default().with_demands(501, 300, 50));
    assert_eq!(
        err,
        ConfigError::DemandExceedsCapacity {
            demand_field: "cpu_demand",
            demand: 501,
            capacity_field: "pod_cpu_limit",
            capacity: 500,
        }
    );

    let err = config_error(SimulationConfig::default().with_demands(200, 1001, 50));
    assert!(matches!(
        err,
        ConfigError::DemandExceedsCapacity {
            demand_field: "memory_demand",
            ..
        }
    ));
}

#[test]
fn non_positive_values_fail() {
    let cases = [
        SimulationConfig::default().with_request_interval(0.0),
        SimulationConfig::default().with_runtime(0.0),
        SimulationConfig {
            network_limit: 0,
            network_demand: 0,
            ..Default::default()
        },
    ];
    for config in cases {
        assert!(matches!(
            config_error(config),
            ConfigError::NonPositive { .. }
        ));
    }
}

#[test]
fn errors_render_field_names() {
    let err = Simulation::new(&SimulationConfig::default().with_request_interval(-2.0))
        .err()
        .expect("invalid config");
    let message = err.to_string();
    assert!(message.contains("request_interval"), "{message}");
}

#[test]
fn demand_equal_to_capacity_is_allowed() {
    let config = SimulationConfig::default()
        .with_seed(3)
        .with_demands(500, 400, 1000);
    assert!(run(&config).is_ok());
}
