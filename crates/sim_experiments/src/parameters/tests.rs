use super::*;

#[test]
fn test_grid_search_single_parameter() {
    let space = ParameterSpace::grid().cpu_demand(vec![100, 200, 300]);
    let sets = space.generate();
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[2].config.cpu_demand, 300);
    assert_eq!(sets[2].config.pod_cpu_limit, 500);
}

#[test]
fn test_grid_search_multiple_parameters() {
    let space = ParameterSpace::grid()
        .total_initial_pods(vec![1, 2])
        .scaling_time(vec![5.0, 10.0]);
    let sets = space.generate();
    assert_eq!(sets.len(), 4);

    assert_eq!(sets[0].config.total_initial_pods, 1);
    assert_eq!(sets[0].config.scaling_time, 5.0);
    assert_eq!(sets[1].config.total_initial_pods, 1);
    assert_eq!(sets[1].config.scaling_time, 10.0);
    assert_eq!(sets[3].config.total_initial_pods, 2);
    assert_eq!(sets[3].experiment_id, "exp_3");
}

#[test]
fn test_invalid_combinations_are_filtered() {
    // A 600 cpu demand never fits a 500 cpu pod.
    let space = ParameterSpace::grid()
        .pod_cpu_limit(vec![500, 1000])
        .cpu_demand(vec![200, 600]);
    let sets = space.generate();
    assert_eq!(sets.len(), 3);
    assert!(sets.iter().all(|s| s.config.validate().is_ok()));
    let ids: Vec<&str> = sets.iter().map(|s| s.experiment_id.as_str()).collect();
    assert_eq!(ids, vec!["exp_0", "exp_1", "exp_2"]);
}

#[test]
fn test_random_sampling() {
    let space = ParameterSpace::grid()
        .request_interval(vec![0.25, 0.5, 1.0, 2.0])
        .total_initial_pods(vec![1, 2, 4]);
    let sets = space.sample_random(10, 42);
    assert_eq!(sets.len(), 10);

    let again = space.sample_random(10, 42);
    let first: Vec<String> = sets.iter().map(|s| format!("{:?}", s.config)).collect();
    let second: Vec<String> = again.iter().map(|s| format!("{:?}", s.config)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_random_sampling_stops_at_space_size() {
    let space = ParameterSpace::grid().total_initial_pods(vec![1, 2]);
    let sets = space.sample_random(10, 7);
    assert_eq!(sets.len(), 2);
}

#[test]
fn test_seed_is_applied_to_config() {
    let sets = ParameterSpace::grid().cpu_demand(vec![100, 200]).generate();
    assert_eq!(sets[1].simulation_config().seed, Some(sets[1].seed));
    assert_ne!(sets[0].seed, sets[1].seed);
}
