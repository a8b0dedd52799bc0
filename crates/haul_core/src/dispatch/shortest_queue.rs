use crate::clock::SimTime;
use crate::ecs::{Station, StationId};

use super::policy::DispatchPolicy;

/// Joins the station with the fewest trucks, counting the one unloading.
///
/// This is a deliberately coarse heuristic: it ignores how long the current
/// unload still has to run, so a numerically shorter queue may free up later
/// than a longer one. [`super::EarliestProjectedFree`] accounts for that.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestQueueLength;

impl DispatchPolicy for ShortestQueueLength {
    fn select_station(
        &self,
        stations: &[Station],
        _now: SimTime,
        _unload_time: SimTime,
    ) -> Option<StationId> {
        // min_by_key keeps the first minimum, i.e. the lowest id.
        stations
            .iter()
            .min_by_key(|station| station.queue_len())
            .map(|station| station.id)
    }

    fn name(&self) -> &'static str {
        "shortest_queue_length"
    }
}
