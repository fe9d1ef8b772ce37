//! Error types for configuration validation and resource bookkeeping.

use bevy_ecs::prelude::Resource;
use thiserror::Error;

use crate::resource::ResourceKind;

/// Rejected configuration, reported before the simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite value greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite value of at least zero, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error(
        "{demand_field} ({demand}) exceeds {capacity_field} ({capacity}); the request could never be served"
    )]
    DemandExceedsCapacity {
        demand_field: &'static str,
        demand: u64,
        capacity_field: &'static str,
        capacity: u64,
    },
}

/// Errors that stop a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("{resource} level {level} cannot absorb {amount} within [0, {capacity}]")]
    ResourceInvariantViolation {
        resource: ResourceKind,
        level: u64,
        amount: u64,
        capacity: u64,
    },
}

pub type SimResult<T> = Result<T, SimError>;

/// Holds a fatal error raised inside a system until the runner collects it.
#[derive(Debug, Default, Resource)]
pub struct SimFault(Option<SimError>);

impl SimFault {
    /// Keeps the first fault; later ones are consequences of it.
    pub fn record(&mut self, error: SimError) {
        if self.0.is_none() {
            self.0 = Some(error);
        }
    }

    pub fn take(&mut self) -> Option<SimError> {
        self.0.take()
    }
}
