use crate::clock::SimTime;
use crate::ecs::{Station, StationId, StationState};

use super::policy::DispatchPolicy;

/// Joins the station projected to reach an empty unload slot first.
///
/// The projection assumes every queued truck takes the full unload time and
/// that a station mid-unload frees at `busy_until`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarliestProjectedFree;

impl EarliestProjectedFree {
    pub fn projected_free_at(station: &Station, now: SimTime, unload_time: SimTime) -> SimTime {
        let queued = station.queue_len() as SimTime;
        match station.state {
            StationState::Unloading => {
                station.busy_until.max(now) + queued.saturating_sub(1) * unload_time
            }
            StationState::Idle | StationState::Admitting => now + queued * unload_time,
        }
    }
}

impl DispatchPolicy for EarliestProjectedFree {
    fn select_station(
        &self,
        stations: &[Station],
        now: SimTime,
        unload_time: SimTime,
    ) -> Option<StationId> {
        stations
            .iter()
            .min_by_key(|station| Self::projected_free_at(station, now, unload_time))
            .map(|station| station.id)
    }

    fn name(&self) -> &'static str {
        "earliest_projected_free"
    }
}
