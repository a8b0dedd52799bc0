use bevy_ecs::prelude::{Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::distributions::MiningTimeSampler;
use crate::ecs::{Fleet, StationState, Stations, TruckActivity};
use crate::scenario::HaulConfig;

/// Load delivered: the truck leaves the queue, the next truck (if any) is
/// admitted at the same instant, and the empty truck heads back to mine again.
pub fn finish_unloading_system(
    event: Res<CurrentEvent>,
    config: Res<HaulConfig>,
    mut clock: ResMut<SimulationClock>,
    mut fleet: ResMut<Fleet>,
    mut stations: ResMut<Stations>,
    mut sampler: ResMut<MiningTimeSampler>,
) {
    let event = event.0;
    if event.kind != EventKind::FinishUnloading {
        return;
    }

    let now = clock.now();
    let station_id = event.assigned_station();
    let station = &mut stations[station_id];
    station.release_front(event.truck);
    match station.front() {
        Some(next) => {
            station.state = StationState::Admitting;
            clock.schedule_at(now, EventKind::StartUnloading, next, Some(station_id));
        }
        None => station.state = StationState::Idle,
    }

    let mining_time = sampler.sample();
    let truck = &mut fleet[event.truck];
    truck.loads_delivered += 1;
    truck.total_travel_time += config.travel_time;
    truck.total_mining_time += mining_time;
    truck.activity = TruckActivity::TravelingToSite;
    debug!(
        truck = %event.truck,
        station = %station_id,
        loads = truck.loads_delivered,
        now,
        "load delivered"
    );

    clock.schedule_at(
        now + config.travel_time + mining_time,
        EventKind::FinishMining,
        event.truck,
        None,
    );
}
