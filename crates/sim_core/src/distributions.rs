//! Random delays applied to request pipelines.
//!
//! Network latency is drawn from a Gaussian around the configured mean with a
//! standard deviation proportional to it, floored at zero. The generator is
//! seedable so runs can be reproduced exactly.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::clock::SimTime;

/// Standard deviation of network latency as a fraction of its mean.
pub const LATENCY_SPREAD: f64 = 0.1;

#[derive(Debug, Clone, Resource)]
pub struct LatencyJitter {
    rng: StdRng,
    spread: f64,
}

impl LatencyJitter {
    /// Seeded jitter; `None` draws the seed from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            spread: LATENCY_SPREAD,
        }
    }

    /// Samples one latency for the given mean.
    pub fn sample(&mut self, mean: SimTime) -> SimTime {
        if mean <= 0.0 {
            return 0.0;
        }
        match Normal::new(mean, mean * self.spread) {
            Ok(normal) => normal.sample(&mut self.rng).max(0.0),
            Err(_) => mean,
        }
    }
}
