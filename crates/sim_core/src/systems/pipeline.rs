//! The per-request pipeline: acquire CPU, raise memory, acquire network,
//! wait out latency and processing, then release everything together.
//!
//! A pipeline is a state machine stepped once per `PipelineResume` event. It
//! runs stages back to back until one of them has to suspend, either queued
//! on a container or waiting for a delay to elapse.

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};
use tracing::{debug, error};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::cluster::Cluster;
use crate::distributions::LatencyJitter;
use crate::ecs::{Pipeline, PipelineStage, Pod};
use crate::error::{SimFault, SimResult};
use crate::resource::{Acquire, ResourceContainer};
use crate::telemetry::PendingSamples;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineProgress {
    /// Waiting on a container or a delay; a later event resumes it.
    Suspended,
    /// Resources released; the request succeeded.
    Completed,
}

/// Steps `pipeline` until it suspends or completes.
pub fn advance_pipeline(
    entity: Entity,
    pipeline: &mut Pipeline,
    pod: &mut Pod,
    network: &mut ResourceContainer,
    clock: &mut SimulationClock,
    jitter: &mut LatencyJitter,
) -> SimResult<PipelineProgress> {
    let profile = pipeline.profile;
    let resume = Some(EventSubject::Pipeline(entity));
    loop {
        match pipeline.stage {
            PipelineStage::AcquireCpu => {
                pipeline.stage = PipelineStage::RaiseMemory;
                if pod.cpu.acquire(entity, profile.cpu_demand)? == Acquire::Queued {
                    debug!(pod = %pod.id, cpu_level = pod.cpu.level(), "pipeline waiting for cpu");
                    return Ok(PipelineProgress::Suspended);
                }
            }
            PipelineStage::RaiseMemory => {
                pipeline.stage = PipelineStage::AcquireNetwork;
                if pod.memory.raise(entity, profile.memory_demand)? == Acquire::Queued {
                    debug!(pod = %pod.id, memory_level = pod.memory.level(), "pipeline waiting for memory");
                    return Ok(PipelineProgress::Suspended);
                }
            }
            PipelineStage::AcquireNetwork => {
                pipeline.stage = PipelineStage::NetworkLatency;
                if network.acquire(entity, profile.network_demand)? == Acquire::Queued {
                    debug!(pod = %pod.id, network_level = network.level(), "pipeline waiting for network");
                    return Ok(PipelineProgress::Suspended);
                }
            }
            PipelineStage::NetworkLatency => {
                let latency = jitter.sample(profile.network_latency_mean);
                pipeline.stage = PipelineStage::Processing;
                clock.schedule_in(latency, EventKind::PipelineResume, resume);
                debug!(pod = %pod.id, now = clock.now(), latency, "request in network transfer");
                return Ok(PipelineProgress::Suspended);
            }
            PipelineStage::Processing => {
                pipeline.stage = PipelineStage::Release;
                clock.schedule_in(profile.request_duration, EventKind::PipelineResume, resume);
                return Ok(PipelineProgress::Suspended);
            }
            PipelineStage::Release => {
                let mut served = pod.cpu.release(profile.cpu_demand)?;
                served.extend(pod.memory.lower(profile.memory_demand)?);
                served.extend(network.release(profile.network_demand)?);

                let now = clock.now();
                for waiter in served {
                    clock.schedule_at(
                        now,
                        EventKind::PipelineResume,
                        Some(EventSubject::Pipeline(waiter)),
                    );
                }
                pipeline.stage = PipelineStage::Finished;
                debug!(
                    pod = %pod.id,
                    now,
                    elapsed = now - pipeline.admitted_at,
                    "request completed"
                );
                return Ok(PipelineProgress::Completed);
            }
            // Nothing left to run; a stray resume is ignored.
            PipelineStage::Finished => return Ok(PipelineProgress::Suspended),
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn pipeline_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut cluster: ResMut<Cluster>,
    mut jitter: ResMut<LatencyJitter>,
    mut pending: ResMut<PendingSamples>,
    mut fault: ResMut<SimFault>,
    mut pipelines: Query<&mut Pipeline>,
    mut pods: Query<&mut Pod>,
) {
    let Some(EventSubject::Pipeline(entity)) = event.0.subject else {
        return;
    };
    let Ok(mut pipeline) = pipelines.get_mut(entity) else {
        return;
    };
    let Ok(mut pod) = pods.get_mut(pipeline.pod) else {
        return;
    };

    let progress = advance_pipeline(
        entity,
        &mut pipeline,
        &mut pod,
        cluster.network_mut(),
        &mut clock,
        &mut jitter,
    );
    match progress {
        Ok(PipelineProgress::Suspended) => {}
        Ok(PipelineProgress::Completed) => {
            cluster.record_success();
            pending.request();
            commands.entity(entity).despawn();
        }
        Err(err) => {
            error!(pod = %pod.id, error = %err, "pipeline halted on resource fault");
            fault.record(err);
        }
    }
}
