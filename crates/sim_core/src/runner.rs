//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent],
//! then runs the schedule. Exactly one event system reacts per step, so the
//! engine behaves as a single cooperative execution context.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{apply_deferred, ExecutorKind, IntoSystemConfigs};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::error::{SimFault, SimResult};
use crate::profiling::EventMetrics;
use crate::scenario::SimulationEndTime;
use crate::systems::{
    handle_request::handle_request_system, pipeline::pipeline_system,
    request_arrival::request_arrival_system, sample_capture::capture_sample_system,
    scale_up::scale_up_system,
};
use crate::telemetry::PendingSamples;

fn is_event(event: Option<Res<CurrentEvent>>, kind: EventKind) -> bool {
    event.map(|e| e.0.kind == kind).unwrap_or(false)
}

fn is_request_arrival(event: Option<Res<CurrentEvent>>) -> bool {
    is_event(event, EventKind::RequestArrival)
}

fn is_handle_request(event: Option<Res<CurrentEvent>>) -> bool {
    is_event(event, EventKind::HandleRequest)
}

fn is_pipeline_resume(event: Option<Res<CurrentEvent>>) -> bool {
    is_event(event, EventKind::PipelineResume)
}

fn is_scale_up_complete(event: Option<Res<CurrentEvent>>) -> bool {
    is_event(event, EventKind::ScaleUpComplete)
}

/// Condition: an event system asked for a sample this step.
fn has_pending_samples(pending: Option<Res<PendingSamples>>) -> bool {
    pending.map(|p| p.is_pending()).unwrap_or(false)
}

/// Runs one simulation step: pops the next event, inserts it as [CurrentEvent], then runs the schedule.
/// Returns `Ok(true)` if an event was processed, `Ok(false)` if the clock was empty or if the next
/// event is later than [SimulationEndTime] (when that resource is present). A resource fault raised
/// during the step is returned as an error.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> SimResult<bool> {
    run_next_event_with_hook(world, schedule, |_, _| {})
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> SimResult<bool>
where
    F: FnMut(&World, &Event),
{
    let stop_at = world.get_resource::<SimulationEndTime>().map(|e| e.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|c| c.next_event_time());
    if let (Some(end), Some(ts)) = (stop_at, next_ts) {
        if ts > end {
            return Ok(false);
        }
    }

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return Ok(false),
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }

    schedule.run(world);

    if let Some(err) = world.get_resource_mut::<SimFault>().and_then(|mut f| f.take()) {
        return Err(err);
    }
    hook(world, &event);
    Ok(true)
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> SimResult<usize> {
    run_until_empty_with_hook(world, schedule, max_steps, |_, _| {})
}

/// Runs simulation steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> SimResult<usize>
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook)? {
        steps += 1;
    }
    Ok(steps)
}

/// Builds the simulation schedule: one system per event kind, [apply_deferred] so that spawned
/// pods and pipelines exist, then sample capture.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.add_systems(
        (
            (
                request_arrival_system.run_if(is_request_arrival),
                handle_request_system.run_if(is_handle_request),
                pipeline_system.run_if(is_pipeline_resume),
                scale_up_system.run_if(is_scale_up_complete),
            ),
            apply_deferred,
            capture_sample_system.run_if(has_pending_samples),
        )
            .chain(),
    );

    schedule
}

/// Schedules the first arrival at time 0.
/// Call this after building the scenario and before running events.
pub fn initialize_simulation(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_at(0.0, EventKind::RequestArrival, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::build_scenario;
    use crate::test_helpers::test_config;

    #[test]
    fn events_after_end_time_are_not_processed() {
        let mut world = World::new();
        build_scenario(&mut world, &test_config().with_runtime(3.0)).expect("config");
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        let mut last_seen = 0.0;
        run_until_empty_with_hook(&mut world, &mut schedule, usize::MAX, |_, event| {
            last_seen = event.timestamp;
        })
        .expect("run");

        assert!(last_seen <= 3.0);
        let clock = world.resource::<SimulationClock>();
        assert!(clock.next_event_time().map_or(true, |ts| ts > 3.0));
        let metrics = world.resource::<EventMetrics>();
        // Arrivals at 0, 1, 2 and 3 are all within the run.
        assert_eq!(metrics.count(EventKind::RequestArrival), 4);
    }

    #[test]
    fn max_steps_bounds_the_run() {
        let mut world = World::new();
        build_scenario(&mut world, &test_config()).expect("config");
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        let steps = run_until_empty(&mut world, &mut schedule, 3).expect("run");
        assert_eq!(steps, 3);
    }
}
