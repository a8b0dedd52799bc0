//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression happens here, outside systems. Each step pops the next
//! event from [SimulationClock], inserts it as [CurrentEvent], then runs the
//! schedule, where exactly one handler system matches the event kind.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::{debug, info};

use crate::clock::{CurrentEvent, Event, EventKind, SimTime, SimulationClock};
use crate::distributions::MiningTimeSampler;
use crate::ecs::{Fleet, TruckActivity, TruckId};
use crate::profiling::EventMetrics;
use crate::scenario::HaulConfig;
use crate::systems::{
    arrive_station::arrive_station_system, finish_mining::finish_mining_system,
    finish_unloading::finish_unloading_system, start_unloading::start_unloading_system,
};

fn current_kind_is(event: Option<Res<CurrentEvent>>, kind: EventKind) -> bool {
    event.map(|e| e.0.kind == kind).unwrap_or(false)
}

fn is_finish_mining(event: Option<Res<CurrentEvent>>) -> bool {
    current_kind_is(event, EventKind::FinishMining)
}

fn is_arrive_station(event: Option<Res<CurrentEvent>>) -> bool {
    current_kind_is(event, EventKind::ArriveStation)
}

fn is_start_unloading(event: Option<Res<CurrentEvent>>) -> bool {
    current_kind_is(event, EventKind::StartUnloading)
}

fn is_finish_unloading(event: Option<Res<CurrentEvent>>) -> bool {
    current_kind_is(event, EventKind::FinishUnloading)
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub events_processed: u64,
    /// Events left in the queue because they fall after the horizon.
    pub events_discarded: usize,
    /// Timestamp of the last processed event.
    pub final_time: SimTime,
}

/// Builds the haul-cycle schedule: one handler per event kind, gated on
/// [CurrentEvent], executed on a single thread.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((
        finish_mining_system.run_if(is_finish_mining),
        arrive_station_system.run_if(is_arrive_station),
        start_unloading_system.run_if(is_start_unloading),
        finish_unloading_system.run_if(is_finish_unloading),
    ));
    schedule
}

/// Seeds the first mining cycle of every truck at time 0.
/// Call this after building the scenario and before running events.
pub fn initialize_simulation(world: &mut World) {
    let truck_count = world.resource::<Fleet>().len();
    let mut durations = Vec::with_capacity(truck_count);
    {
        let mut sampler = world.resource_mut::<MiningTimeSampler>();
        for _ in 0..truck_count {
            durations.push(sampler.sample());
        }
    }

    {
        let mut fleet = world.resource_mut::<Fleet>();
        for (truck, &duration) in fleet.0.iter_mut().zip(&durations) {
            truck.activity = TruckActivity::Mining;
            truck.total_mining_time += duration;
        }
    }

    let mut clock = world.resource_mut::<SimulationClock>();
    for (i, duration) in durations.into_iter().enumerate() {
        clock.schedule_at(duration, EventKind::FinishMining, TruckId(i), None);
    }
}

/// Runs one simulation step. Returns `false` when the clock is empty or the
/// next event lies strictly after the [HaulConfig] horizon (when present);
/// such events are left unprocessed.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    run_next_event_with_hook(world, schedule, |_, _| {})
}

/// Runs one simulation step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    let horizon = world.get_resource::<HaulConfig>().map(|c| c.horizon);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|c| c.next_event_time());
    match (horizon, next_ts) {
        (_, None) => return false,
        (Some(horizon), Some(ts)) if ts > horizon => return false,
        _ => {}
    }

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(&event);
    }
    debug!(
        t = event.timestamp,
        kind = ?event.kind,
        truck = %event.truck,
        station = ?event.station,
        "processing event"
    );

    schedule.run(world);
    hook(world, &event);
    true
}

/// Processes events until the queue empties or the horizon is reached.
pub fn run_to_horizon(world: &mut World, schedule: &mut Schedule) -> RunSummary {
    run_to_horizon_with_hook(world, schedule, |_, _| {})
}

/// Like [run_to_horizon], invoking `hook` after each processed event.
pub fn run_to_horizon_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    mut hook: F,
) -> RunSummary
where
    F: FnMut(&World, &Event),
{
    let mut events_processed = 0;
    while run_next_event_with_hook(world, schedule, &mut hook) {
        events_processed += 1;
    }

    let clock = world.resource::<SimulationClock>();
    let summary = RunSummary {
        events_processed,
        events_discarded: clock.len(),
        final_time: clock.now(),
    };
    info!(
        events = summary.events_processed,
        discarded = summary.events_discarded,
        final_time = summary.final_time,
        "simulation finished"
    );
    summary
}
