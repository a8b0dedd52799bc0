#![allow(dead_code)]

use bevy_ecs::prelude::World;
use haul_core::clock::SimTime;
use haul_core::dispatch::DispatchPolicyKind;
use haul_core::scenario::HaulParams;
use haul_core::test_helpers::{create_test_world, TEST_SEED};

/// Builder for reproducible haul worlds with compact overrides.
#[derive(Clone, Debug)]
pub struct TestWorldBuilder {
    params: HaulParams,
}

impl TestWorldBuilder {
    pub fn new(trucks: usize, stations: usize) -> Self {
        Self {
            params: HaulParams::new(trucks, stations).with_seed(TEST_SEED),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params = self.params.with_seed(seed);
        self
    }

    pub fn with_fixed_mining_time(mut self, minutes: SimTime) -> Self {
        self.params = self.params.with_fixed_mining_time(minutes);
        self
    }

    pub fn with_horizon(mut self, minutes: SimTime) -> Self {
        self.params = self.params.with_horizon(minutes);
        self
    }

    pub fn with_unload_time(mut self, minutes: SimTime) -> Self {
        self.params = self.params.with_unload_time(minutes);
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicyKind) -> Self {
        self.params = self.params.with_dispatch_policy(policy);
        self
    }

    pub fn params(&self) -> &HaulParams {
        &self.params
    }

    /// Build the world with the first mining cycle of every truck scheduled.
    pub fn build(self) -> World {
        create_test_world(&self.params)
    }
}
