mod support;

use sim_core::run;
use sim_core::test_helpers::test_config;

#[test]
fn same_seed_gives_identical_samples() {
    let config = test_config().with_request_interval(0.4);
    let first = serde_json::to_string(&run(&config).expect("run")).expect("json");
    let second = serde_json::to_string(&run(&config).expect("run")).expect("json");
    assert_eq!(first, second);
}

#[test]
fn same_seed_gives_identical_timestamps() {
    let config = test_config().with_request_interval(0.7).with_runtime(80.0);
    let first: Vec<f64> = run(&config).expect("run").iter().map(|s| s.timestamp).collect();
    let second: Vec<f64> = run(&config).expect("run").iter().map(|s| s.timestamp).collect();
    assert_eq!(first, second);
}

#[test]
fn seed_changes_completion_times() {
    let base = test_config()
        .with_pod_limits(5000, 100_000)
        .with_runtime(20.0);
    let a: Vec<f64> = run(&base.clone().with_seed(1))
        .expect("run")
        .iter()
        .map(|s| s.timestamp)
        .collect();
    let b: Vec<f64> = run(&base.with_seed(2))
        .expect("run")
        .iter()
        .map(|s| s.timestamp)
        .collect();
    assert_ne!(a, b);
}

#[test]
fn runs_do_not_share_state() {
    let config = test_config();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || run(&config).expect("run"))
        })
        .collect();
    let expected = run(&config).expect("run");
    for handle in handles {
        assert_eq!(handle.join().expect("thread"), expected);
    }
}
