//! Bounded resource containers with blocking acquire and release.
//!
//! A container holds a `level` in `[0, capacity]`. Pipelines that cannot be
//! served immediately wait in per-direction FIFO queues: `acquire` takes from
//! the level, `raise` adds to it. Granting a queued request deducts (or adds)
//! the amount at grant time, so a resumed pipeline never re-checks the level.

use std::collections::VecDeque;
use std::fmt;

use bevy_ecs::prelude::Entity;

use crate::error::{ConfigError, SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cpu,
    Memory,
    Network,
}

impl ResourceKind {
    fn demand_field(self) -> &'static str {
        match self {
            ResourceKind::Cpu => "cpu_demand",
            ResourceKind::Memory => "memory_demand",
            ResourceKind::Network => "network_demand",
        }
    }

    fn capacity_field(self) -> &'static str {
        match self {
            ResourceKind::Cpu => "pod_cpu_limit",
            ResourceKind::Memory => "pod_memory_limit",
            ResourceKind::Network => "network_limit",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Cpu => "cpu",
            ResourceKind::Memory => "memory",
            ResourceKind::Network => "network",
        };
        f.write_str(name)
    }
}

/// Result of a blocking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// The amount was applied immediately; the caller keeps running.
    Granted,
    /// The caller is queued and will be resumed once served.
    Queued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Waiter {
    pipeline: Entity,
    amount: u64,
}

#[derive(Debug, Clone)]
pub struct ResourceContainer {
    kind: ResourceKind,
    capacity: u64,
    level: u64,
    takers: VecDeque<Waiter>,
    fillers: VecDeque<Waiter>,
}

impl ResourceContainer {
    /// A container starting at full capacity (available-amount semantics).
    pub fn full(kind: ResourceKind, capacity: u64) -> Self {
        Self::with_level(kind, capacity, capacity)
    }

    /// A container starting empty (used-amount semantics).
    pub fn empty(kind: ResourceKind, capacity: u64) -> Self {
        Self::with_level(kind, capacity, 0)
    }

    fn with_level(kind: ResourceKind, capacity: u64, level: u64) -> Self {
        Self {
            kind,
            capacity,
            level,
            takers: VecDeque::new(),
            fillers: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    /// Number of pipelines queued in either direction.
    pub fn waiting(&self) -> usize {
        self.takers.len() + self.fillers.len()
    }

    /// Takes `amount` from the level, queueing behind earlier requests when
    /// the level is short.
    pub fn acquire(&mut self, pipeline: Entity, amount: u64) -> SimResult<Acquire> {
        self.check_servable(amount)?;
        if self.takers.is_empty() && self.level >= amount {
            self.level -= amount;
            return Ok(Acquire::Granted);
        }
        self.takers.push_back(Waiter { pipeline, amount });
        Ok(Acquire::Queued)
    }

    /// Adds `amount` to the level, queueing while it would overflow capacity.
    pub fn raise(&mut self, pipeline: Entity, amount: u64) -> SimResult<Acquire> {
        self.check_servable(amount)?;
        if self.fillers.is_empty() && self.level + amount <= self.capacity {
            self.level += amount;
            return Ok(Acquire::Granted);
        }
        self.fillers.push_back(Waiter { pipeline, amount });
        Ok(Acquire::Queued)
    }

    /// Returns `amount` to the level. Returns the pipelines whose queued
    /// requests were served as a result, in service order.
    pub fn release(&mut self, amount: u64) -> SimResult<Vec<Entity>> {
        if self.level + amount > self.capacity {
            return Err(self.violation(amount));
        }
        self.level += amount;
        Ok(self.serve_waiters())
    }

    /// Removes `amount` previously added with [`Self::raise`].
    pub fn lower(&mut self, amount: u64) -> SimResult<Vec<Entity>> {
        if amount > self.level {
            return Err(self.violation(amount));
        }
        self.level -= amount;
        Ok(self.serve_waiters())
    }

    fn check_servable(&self, amount: u64) -> SimResult<()> {
        if amount > self.capacity {
            return Err(ConfigError::DemandExceedsCapacity {
                demand_field: self.kind.demand_field(),
                demand: amount,
                capacity_field: self.kind.capacity_field(),
                capacity: self.capacity,
            }
            .into());
        }
        Ok(())
    }

    fn violation(&self, amount: u64) -> SimError {
        SimError::ResourceInvariantViolation {
            resource: self.kind,
            level: self.level,
            amount,
            capacity: self.capacity,
        }
    }

    fn serve_waiters(&mut self) -> Vec<Entity> {
        let mut served = Vec::new();
        loop {
            let mut progressed = false;
            while let Some(head) = self.takers.front().copied() {
                if self.level < head.amount {
                    break;
                }
                self.level -= head.amount;
                self.takers.pop_front();
                served.push(head.pipeline);
                progressed = true;
            }
            while let Some(head) = self.fillers.front().copied() {
                if self.level + head.amount > self.capacity {
                    break;
                }
                self.level += head.amount;
                self.fillers.pop_front();
                served.push(head.pipeline);
                progressed = true;
            }
            if !progressed {
                return served;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(raw: u32) -> Entity {
        Entity::from_raw(raw)
    }

    #[test]
    fn acquire_grants_when_level_suffices() {
        let mut cpu = ResourceContainer::full(ResourceKind::Cpu, 500);
        assert_eq!(cpu.acquire(pipeline(1), 200), Ok(Acquire::Granted));
        assert_eq!(cpu.level(), 300);
    }

    #[test]
    fn acquire_larger_than_capacity_is_a_configuration_error() {
        let mut network = ResourceContainer::full(ResourceKind::Network, 100);
        let err = network.acquire(pipeline(1), 101).unwrap_err();
        assert!(matches!(
            err,
            SimError::Configuration(ConfigError::DemandExceedsCapacity {
                demand: 101,
                capacity: 100,
                ..
            })
        ));
        assert_eq!(network.waiting(), 0);
    }

    #[test]
    fn queued_requests_are_served_in_arrival_order() {
        let mut cpu = ResourceContainer::full(ResourceKind::Cpu, 500);
        cpu.acquire(pipeline(1), 400).unwrap();
        assert_eq!(cpu.acquire(pipeline(2), 300), Ok(Acquire::Queued));
        // Fits the remaining level, but must not overtake the queued request.
        assert_eq!(cpu.acquire(pipeline(3), 100), Ok(Acquire::Queued));

        let served = cpu.release(400).unwrap();
        assert_eq!(served, vec![pipeline(2), pipeline(3)]);
        assert_eq!(cpu.level(), 100);
        assert_eq!(cpu.waiting(), 0);
    }

    #[test]
    fn head_of_queue_blocks_until_fully_satisfiable() {
        let mut cpu = ResourceContainer::full(ResourceKind::Cpu, 500);
        cpu.acquire(pipeline(1), 500).unwrap();
        cpu.acquire(pipeline(2), 300).unwrap();

        assert!(cpu.release(200).unwrap().is_empty());
        assert_eq!(cpu.level(), 200);
        assert_eq!(cpu.release(300).unwrap(), vec![pipeline(2)]);
        assert_eq!(cpu.level(), 200);
    }

    #[test]
    fn release_past_capacity_is_an_invariant_violation() {
        let mut cpu = ResourceContainer::full(ResourceKind::Cpu, 500);
        let err = cpu.release(1).unwrap_err();
        assert_eq!(
            err,
            SimError::ResourceInvariantViolation {
                resource: ResourceKind::Cpu,
                level: 500,
                amount: 1,
                capacity: 500,
            }
        );
        assert_eq!(cpu.level(), 500);
    }

    #[test]
    fn raise_and_lower_track_used_amount() {
        let mut memory = ResourceContainer::empty(ResourceKind::Memory, 1000);
        assert_eq!(memory.raise(pipeline(1), 300), Ok(Acquire::Granted));
        assert_eq!(memory.level(), 300);
        memory.lower(300).unwrap();
        assert_eq!(memory.level(), 0);
        assert!(matches!(
            memory.lower(1),
            Err(SimError::ResourceInvariantViolation { .. })
        ));
    }

    #[test]
    fn raise_waits_for_room_below_capacity() {
        let mut memory = ResourceContainer::empty(ResourceKind::Memory, 1000);
        memory.raise(pipeline(1), 800).unwrap();
        assert_eq!(memory.raise(pipeline(2), 300), Ok(Acquire::Queued));
        assert_eq!(memory.level(), 800);

        assert_eq!(memory.lower(800).unwrap(), vec![pipeline(2)]);
        assert_eq!(memory.level(), 300);
    }
}
