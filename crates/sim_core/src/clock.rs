use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

use crate::ecs::RequestProfile;

/// Virtual time in simulation units.
pub type SimTime = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// The request generator emits one arrival and re-arms itself.
    RequestArrival,
    /// The cluster runs admission for one arrival.
    HandleRequest,
    /// A suspended pipeline continues (resource granted or delay elapsed).
    PipelineResume,
    /// A pending scale-up finishes its cooldown and adds a pod.
    ScaleUpComplete,
}

/// What an event is about, when the kind alone is not enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventSubject {
    Request(RequestProfile),
    Pipeline(Entity),
}

#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub timestamp: SimTime,
    /// Issuance order; breaks ties between events due at the same instant.
    pub seq: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .total_cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// The event being handled by the current schedule run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: SimTime,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedules an event at an absolute time and returns its issuance number.
    pub fn schedule_at(
        &mut self,
        timestamp: SimTime,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> u64 {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            seq,
            kind,
            subject,
        });
        seq
    }

    /// Schedules an event `delay` units after now.
    pub fn schedule_in(
        &mut self,
        delay: SimTime,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> u64 {
        self.schedule_at(self.now + delay.max(0.0), kind, subject)
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10.0, EventKind::RequestArrival, None);
        clock.schedule_at(5.0, EventKind::HandleRequest, None);
        clock.schedule_at(20.0, EventKind::ScaleUpComplete, None);

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5.0);
        assert_eq!(clock.now(), 5.0);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10.0);
        assert_eq!(clock.now(), 10.0);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20.0);
        assert_eq!(third.kind, EventKind::ScaleUpComplete);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn same_instant_events_pop_in_issue_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(3.0, EventKind::ScaleUpComplete, None);
        clock.schedule_at(3.0, EventKind::RequestArrival, None);
        clock.schedule_at(3.0, EventKind::HandleRequest, None);

        let kinds: Vec<EventKind> = std::iter::from_fn(|| clock.pop_next())
            .map(|event| event.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::ScaleUpComplete,
                EventKind::RequestArrival,
                EventKind::HandleRequest,
            ]
        );
    }

    #[test]
    fn schedule_in_is_relative_to_now() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(4.0, EventKind::RequestArrival, None);
        clock.pop_next().expect("event");

        clock.schedule_in(2.5, EventKind::PipelineResume, None);
        assert_eq!(clock.next_event_time(), Some(6.5));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn zero_delay_runs_after_already_queued_events_at_now() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(0.0, EventKind::RequestArrival, None);
        clock.schedule_at(1.0, EventKind::ScaleUpComplete, None);
        clock.pop_next().expect("arrival");

        clock.schedule_at(1.0, EventKind::HandleRequest, None);
        assert_eq!(
            clock.pop_next().map(|e| e.kind),
            Some(EventKind::ScaleUpComplete)
        );
        assert_eq!(
            clock.pop_next().map(|e| e.kind),
            Some(EventKind::HandleRequest)
        );
    }
}
