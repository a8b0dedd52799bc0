use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Fleet, TruckActivity};
use crate::scenario::HaulConfig;

/// Mining done: the loaded truck sets off for the stations.
pub fn finish_mining_system(
    event: Res<CurrentEvent>,
    config: Res<HaulConfig>,
    mut clock: ResMut<SimulationClock>,
    mut fleet: ResMut<Fleet>,
) {
    let event = event.0;
    if event.kind != EventKind::FinishMining {
        return;
    }

    let truck = &mut fleet[event.truck];
    // The return trip and the next mining cycle share one FinishMining event.
    debug_assert!(matches!(
        truck.activity,
        TruckActivity::Mining | TruckActivity::TravelingToSite
    ));
    truck.total_travel_time += config.travel_time;
    truck.activity = TruckActivity::TravelingToStation;

    clock.schedule_in(config.travel_time, EventKind::ArriveStation, event.truck, None);
}
