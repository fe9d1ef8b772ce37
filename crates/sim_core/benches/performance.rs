//! Performance benchmarks for sim_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_core::resource::{ResourceContainer, ResourceKind};
use sim_core::runner::{initialize_simulation, run_until_empty, simulation_schedule};
use sim_core::scenario::{build_scenario, SimulationConfig};

fn bench_simulation_run(c: &mut Criterion) {
    // (name, runtime, request interval)
    let scenarios = vec![
        ("small", 50.0, 1.0),
        ("medium", 500.0, 0.5),
        ("large", 5_000.0, 0.25),
    ];

    let mut group = c.benchmark_group("simulation_run");
    for (name, runtime, interval) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(runtime, interval),
            |b, &(runtime, interval)| {
                b.iter(|| {
                    let mut world = World::new();
                    let config = SimulationConfig::default()
                        .with_seed(42)
                        .with_runtime(runtime)
                        .with_request_interval(interval)
                        .with_pod_limits(2000, 100_000);
                    build_scenario(&mut world, &config).expect("config");
                    initialize_simulation(&mut world);
                    let mut schedule = simulation_schedule();
                    black_box(run_until_empty(&mut world, &mut schedule, usize::MAX))
                });
            },
        );
    }
    group.finish();
}

fn bench_container_churn(c: &mut Criterion) {
    use bevy_ecs::prelude::Entity;

    c.bench_function("container_acquire_release", |b| {
        b.iter(|| {
            let mut cpu = ResourceContainer::full(ResourceKind::Cpu, 1_000);
            for i in 0..100u32 {
                let _ = cpu.acquire(Entity::from_raw(i), 200);
            }
            for _ in 0..100 {
                let _ = black_box(cpu.release(200));
            }
        });
    });
}

criterion_group!(benches, bench_simulation_run, bench_container_churn);
criterion_main!(benches);
