//! Fixed-interval request generator.

use bevy_ecs::prelude::Resource;

use crate::clock::SimTime;
use crate::ecs::RequestProfile;

/// Emits one arrival every `interval` units, starting at time zero.
#[derive(Debug, Clone, Resource)]
pub struct RequestGenerator {
    pub profile: RequestProfile,
    pub interval: SimTime,
    arrivals: u64,
}

impl RequestGenerator {
    pub fn new(profile: RequestProfile, interval: SimTime) -> Self {
        Self {
            profile,
            interval,
            arrivals: 0,
        }
    }

    /// Arrivals emitted so far.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    /// Counts one arrival and returns when the next one is due.
    ///
    /// Arrival `n` is due at `n * interval`, so fixed intervals do not drift.
    pub fn emit(&mut self) -> SimTime {
        self.arrivals += 1;
        self.arrivals as f64 * self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrivals_are_spaced_by_interval_without_drift() {
        let profile = RequestProfile {
            memory_demand: 1,
            cpu_demand: 1,
            network_demand: 1,
            request_duration: 1.0,
            network_latency_mean: 1.0,
        };
        let mut generator = RequestGenerator::new(profile, 0.1);
        let mut next = 0.0;
        for _ in 0..30 {
            next = generator.emit();
        }
        assert_eq!(generator.arrivals(), 30);
        assert_eq!(next, 30.0 * 0.1);
    }
}
