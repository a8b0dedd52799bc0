#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use haul_core::clock::Event;
use haul_core::runner::{run_next_event, run_to_horizon, run_to_horizon_with_hook, simulation_schedule, RunSummary};

/// Helper that owns a reusable `Schedule` so tests can step or drain the event queue.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    /// Create a runner with the default simulation schedule.
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Run a single event (returns `true` if an event was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule)
    }

    /// Drive the simulation to the horizon.
    pub fn run_full(&mut self, world: &mut World) -> RunSummary {
        run_to_horizon(world, &mut self.schedule)
    }

    /// Drive the simulation to the horizon, calling `hook` after every event.
    pub fn run_full_with_hook<F>(&mut self, world: &mut World, hook: F) -> RunSummary
    where
        F: FnMut(&World, &Event),
    {
        run_to_horizon_with_hook(world, &mut self.schedule, hook)
    }
}
