//! Event processing metrics recorded by the runner.

use std::collections::HashMap;
use std::time::Instant;

use bevy_ecs::prelude::Resource;
use tracing::info;

use crate::clock::EventKind;

/// Event processing rate metrics.
#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    /// Total events processed.
    pub events_processed: u64,
    /// Wall-clock start, set on the first recorded event.
    pub start_time: Option<Instant>,
    pub events_by_kind: HashMap<EventKind, u64>,
}

impl EventMetrics {
    /// Record an event being processed.
    pub fn record_event(&mut self, kind: EventKind) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.events_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Events per wall-clock second since the first event.
    pub fn events_per_second(&self) -> f64 {
        match self.start_time {
            Some(start) => {
                let elapsed = start.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    self.events_processed as f64 / elapsed
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    /// Logs totals and a per-kind breakdown, busiest kind first.
    pub fn log_summary(&self) {
        info!(
            events = self.events_processed,
            events_per_second = format_args!("{:.0}", self.events_per_second()),
            "event processing summary"
        );
        let mut entries: Vec<_> = self.events_by_kind.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (kind, count) in entries {
            info!(kind = ?kind, count, "events by kind");
        }
    }
}
