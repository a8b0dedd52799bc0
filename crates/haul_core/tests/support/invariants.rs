#![allow(dead_code)]

use std::collections::HashMap;

use bevy_ecs::prelude::World;
use haul_core::clock::{EventKind, SimulationClock};
use haul_core::ecs::{Fleet, StationState, Stations, TruckActivity, TruckId};
use haul_core::scenario::HaulConfig;

/// Structural invariants that must hold between any two events.
pub fn assert_world_consistent(world: &World) {
    let fleet = world.resource::<Fleet>();
    let stations = world.resource::<Stations>();
    let clock = world.resource::<SimulationClock>();

    let mut queued_at: HashMap<TruckId, usize> = HashMap::new();
    for station in stations.iter() {
        for truck in station.queued() {
            *queued_at.entry(truck).or_insert(0) += 1;
        }
        match station.state {
            StationState::Idle => assert_eq!(station.queue_len(), 0, "idle station {} has a queue", station.id),
            StationState::Admitting | StationState::Unloading => {
                assert!(station.front().is_some(), "busy station {} has no front", station.id)
            }
        }
    }
    assert!(
        queued_at.values().all(|&n| n == 1),
        "a truck appears in more than one queue"
    );

    let mut pending_per_truck: HashMap<TruckId, usize> = HashMap::new();
    for event in clock.pending() {
        *pending_per_truck.entry(event.truck).or_insert(0) += 1;
    }
    assert!(
        pending_per_truck.values().all(|&n| n <= 1),
        "a truck has more than one pending event"
    );

    for truck in fleet.iter() {
        match truck.activity {
            TruckActivity::AtStation { station } => {
                assert!(stations[station].contains(truck.id));
            }
            _ => assert!(!queued_at.contains_key(&truck.id)),
        }
    }
}

/// Every minute a truck is committed to is booked in exactly one accumulator.
pub fn assert_time_accounted(world: &World) {
    let fleet = world.resource::<Fleet>();
    let clock = world.resource::<SimulationClock>();
    let horizon = world.resource::<HaulConfig>().horizon;

    let pending: HashMap<TruckId, _> = clock.pending().map(|e| (e.truck, *e)).collect();
    for truck in fleet.iter() {
        let expected = match (truck.activity, pending.get(&truck.id)) {
            (TruckActivity::Stalled, _) => horizon,
            (_, Some(event)) if event.kind == EventKind::StartUnloading => truck.arrived_at,
            (_, Some(event)) => event.timestamp,
            // Queued behind another truck.
            (_, None) => truck.arrived_at,
        };
        assert_eq!(
            truck.accounted_time(),
            expected,
            "truck {} accounted {} but is committed until {}",
            truck.id,
            truck.accounted_time(),
            expected
        );
    }
}
