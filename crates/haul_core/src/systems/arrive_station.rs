use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, warn};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::dispatch::DispatchPolicyResource;
use crate::ecs::{Fleet, StationState, Stations, TruckActivity};
use crate::scenario::HaulConfig;

/// A loaded truck reaches the unload area and joins a station queue.
///
/// With no stations at all the truck can never unload: the rest of the
/// horizon is booked as waiting and nothing further is scheduled for it.
pub fn arrive_station_system(
    event: Res<CurrentEvent>,
    config: Res<HaulConfig>,
    policy: Res<DispatchPolicyResource>,
    mut clock: ResMut<SimulationClock>,
    mut fleet: ResMut<Fleet>,
    mut stations: ResMut<Stations>,
) {
    let event = event.0;
    if event.kind != EventKind::ArriveStation {
        return;
    }

    let now = clock.now();
    let truck = &mut fleet[event.truck];

    let Some(station_id) = policy.select_station(stations.as_slice(), now, config.unload_time)
    else {
        truck.total_wait_time += config.horizon.saturating_sub(now);
        truck.activity = TruckActivity::Stalled;
        warn!(truck = %event.truck, now, "no unload stations; truck stalled");
        return;
    };

    truck.arrived_at = now;
    truck.activity = TruckActivity::AtStation {
        station: station_id,
    };

    let station = &mut stations[station_id];
    station.enqueue(event.truck);
    debug!(
        truck = %event.truck,
        station = %station_id,
        queue_len = station.queue_len(),
        now,
        "truck queued"
    );

    if station.state == StationState::Idle {
        if let Some(front) = station.front() {
            station.state = StationState::Admitting;
            clock.schedule_at(now, EventKind::StartUnloading, front, Some(station_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::ecs::{StationId, TruckId};

    fn world_with(trucks: usize, stations: usize) -> World {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());
        world.insert_resource(HaulConfig::default());
        world.insert_resource(DispatchPolicyResource::default());
        world.insert_resource(Fleet::with_trucks(trucks));
        world.insert_resource(Stations::with_stations(stations));
        world
    }

    fn dispatch(world: &mut World, truck: usize, at: u64) {
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(at, EventKind::ArriveStation, TruckId(truck), None);
        let event = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("arrival event");
        world.insert_resource(CurrentEvent(event));
        let mut schedule = Schedule::default();
        schedule.add_systems(arrive_station_system);
        schedule.run(world);
    }

    #[test]
    fn idle_station_admits_immediately() {
        let mut world = world_with(1, 1);
        dispatch(&mut world, 0, 90);

        let station = &world.resource::<Stations>()[StationId(0)];
        assert_eq!(station.front(), Some(TruckId(0)));
        assert_eq!(station.state, StationState::Admitting);
        let truck = &world.resource::<Fleet>()[TruckId(0)];
        assert_eq!(truck.arrived_at, 90);

        let next = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("start unloading");
        assert_eq!(next.kind, EventKind::StartUnloading);
        assert_eq!(next.timestamp, 90);
        assert_eq!(next.station, Some(StationId(0)));
    }

    #[test]
    fn simultaneous_arrivals_schedule_a_single_admission() {
        let mut world = world_with(2, 1);
        dispatch(&mut world, 0, 90);
        // Truck 1 arrives while truck 0's StartUnloading is still pending.
        let admission = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("start unloading for truck 0");
        assert_eq!(admission.truck, TruckId(0));
        dispatch(&mut world, 1, 90);

        let station = &world.resource::<Stations>()[StationId(0)];
        assert_eq!(station.queue_len(), 2);
        assert_eq!(station.front(), Some(TruckId(0)));
        assert!(world.resource::<SimulationClock>().is_empty());
    }

    #[test]
    fn no_stations_stalls_the_truck_for_the_rest_of_the_horizon() {
        let mut world = world_with(1, 0);
        dispatch(&mut world, 0, 90);

        let truck = &world.resource::<Fleet>()[TruckId(0)];
        assert_eq!(truck.total_wait_time, 4320 - 90);
        assert_eq!(truck.activity, TruckActivity::Stalled);
        assert!(world.resource::<SimulationClock>().is_empty());
    }
}
