//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use bevy_ecs::prelude::World;

use crate::runner::{initialize_simulation, run_to_horizon, simulation_schedule, RunSummary};
use crate::scenario::{build_scenario, HaulParams};

/// Seed used by tests that do not care about the particular stream.
pub const TEST_SEED: u64 = 42;

/// Build a world for `params` and seed the first mining cycle.
///
/// # Panics
///
/// Panics if `params` are invalid.
pub fn create_test_world(params: &HaulParams) -> World {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("test params should be valid");
    initialize_simulation(&mut world);
    world
}

/// Build, initialize and run `params` to the horizon.
pub fn run_params(params: &HaulParams) -> (World, RunSummary) {
    let mut world = create_test_world(params);
    let mut schedule = simulation_schedule();
    let summary = run_to_horizon(&mut world, &mut schedule);
    (world, summary)
}
