use bevy_ecs::prelude::ResMut;
use tracing::debug;

use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::generator::RequestGenerator;

/// Spawns an admission for the arriving request and re-arms the generator.
///
/// Admission runs as its own event so a slow admission never delays the
/// next arrival.
pub fn request_arrival_system(
    mut clock: ResMut<SimulationClock>,
    mut generator: ResMut<RequestGenerator>,
) {
    let now = clock.now();
    let profile = generator.profile;
    clock.schedule_at(
        now,
        EventKind::HandleRequest,
        Some(EventSubject::Request(profile)),
    );

    let next_arrival = generator.emit();
    clock.schedule_at(next_arrival, EventKind::RequestArrival, None);
    debug!(now, arrivals = generator.arrivals(), next_arrival, "request arrived");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::test_helpers::test_profile;

    #[test]
    fn arrival_schedules_admission_now_and_next_arrival_later() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(RequestGenerator::new(test_profile(), 2.0));

        let mut schedule = Schedule::default();
        schedule.add_systems(request_arrival_system);
        schedule.run(&mut world);

        let mut clock = world.resource_mut::<SimulationClock>();
        let admission = clock.pop_next().expect("admission");
        assert_eq!(admission.kind, EventKind::HandleRequest);
        assert_eq!(admission.timestamp, 0.0);
        assert_eq!(
            admission.subject,
            Some(EventSubject::Request(test_profile()))
        );

        let next = clock.pop_next().expect("next arrival");
        assert_eq!(next.kind, EventKind::RequestArrival);
        assert_eq!(next.timestamp, 2.0);
        assert!(clock.is_empty());
    }
}
