use crate::clock::SimTime;
use crate::ecs::{Station, StationId};

/// Chooses the station an arriving truck joins.
///
/// Implementations scan `stations` in id order and must break ties on the
/// lowest station id so runs stay reproducible.
pub trait DispatchPolicy: Send + Sync {
    /// Returns `None` only when `stations` is empty.
    ///
    /// * `now` - Current simulation time in minutes
    /// * `unload_time` - Fixed unload duration, for policies that project ahead
    fn select_station(
        &self,
        stations: &[Station],
        now: SimTime,
        unload_time: SimTime,
    ) -> Option<StationId>;

    fn name(&self) -> &'static str;
}
