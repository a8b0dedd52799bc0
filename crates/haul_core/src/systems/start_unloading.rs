use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Fleet, StationState, Stations};
use crate::scenario::HaulConfig;

/// The queue front takes the unload slot.
pub fn start_unloading_system(
    event: Res<CurrentEvent>,
    config: Res<HaulConfig>,
    mut clock: ResMut<SimulationClock>,
    mut fleet: ResMut<Fleet>,
    mut stations: ResMut<Stations>,
) {
    let event = event.0;
    if event.kind != EventKind::StartUnloading {
        return;
    }

    let now = clock.now();
    let station_id = event.assigned_station();
    let station = &mut stations[station_id];
    debug_assert_eq!(station.front(), Some(event.truck));
    debug_assert_eq!(station.state, StationState::Admitting);

    let finish_at = now + config.unload_time;
    station.state = StationState::Unloading;
    station.busy_until = finish_at;
    station.total_busy_time += config.unload_time;

    let truck = &mut fleet[event.truck];
    truck.total_wait_time += now - truck.arrived_at;
    truck.total_unload_time += config.unload_time;

    clock.schedule_at(
        finish_at,
        EventKind::FinishUnloading,
        event.truck,
        Some(station_id),
    );
}
