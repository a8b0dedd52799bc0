mod support;

use haul_core::clock::{EventKind, SimulationClock};
use haul_core::ecs::{Fleet, StationId, StationState, Stations, TruckActivity, TruckId};
use haul_core::profiling::EventMetrics;
use haul_core::telemetry::fleet_report;
use support::schedule::ScheduleRunner;
use support::world::TestWorldBuilder;

#[test]
fn single_truck_single_station_cycle_timings() {
    let mut world = TestWorldBuilder::new(1, 1)
        .with_fixed_mining_time(60)
        .with_horizon(200)
        .build();
    let summary = ScheduleRunner::new().run_full(&mut world);

    // mine 60 -> travel (90) -> unload 90..95 -> travel back + mine 60 -> 185 -> travel.
    let truck = &world.resource::<Fleet>()[TruckId(0)];
    assert_eq!(truck.loads_delivered, 1);
    assert_eq!(truck.total_wait_time, 0);
    assert_eq!(truck.total_unload_time, 5);
    assert_eq!(truck.total_travel_time, 90);
    assert_eq!(truck.total_mining_time, 120);
    assert_eq!(truck.activity, TruckActivity::TravelingToStation);

    assert_eq!(summary.final_time, 185);
    assert_eq!(summary.events_discarded, 1);
    let pending = world
        .resource::<SimulationClock>()
        .pending()
        .next()
        .copied()
        .expect("arrival past the horizon");
    assert_eq!(pending.kind, EventKind::ArriveStation);
    assert_eq!(pending.timestamp, 215);
}

#[test]
fn zero_stations_stall_the_truck_after_its_first_trip() {
    let mut world = TestWorldBuilder::new(1, 0)
        .with_fixed_mining_time(60)
        .build();
    let summary = ScheduleRunner::new().run_full(&mut world);

    assert_eq!(summary.events_processed, 2);
    assert_eq!(summary.events_discarded, 0);
    assert_eq!(summary.final_time, 90);

    let truck = &world.resource::<Fleet>()[TruckId(0)];
    assert_eq!(truck.total_wait_time, 4320 - 90);
    assert_eq!(truck.loads_delivered, 0);
    assert_eq!(truck.total_mining_time, 60);
    assert_eq!(truck.activity, TruckActivity::Stalled);
    assert!(world.resource::<SimulationClock>().is_empty());

    let report = fleet_report(&world);
    assert_eq!(report.stalled_trucks(), 1);
    assert!(report.stations.is_empty());
}

#[test]
fn two_trucks_arriving_together_queue_behind_each_other() {
    let mut world = TestWorldBuilder::new(2, 1)
        .with_fixed_mining_time(60)
        .with_horizon(200)
        .build();
    let mut runner = ScheduleRunner::new();

    // FinishMining x2, ArriveStation x2: both trucks reach the station at t=90.
    for _ in 0..4 {
        assert!(runner.run_one(&mut world));
    }
    {
        let station = &world.resource::<Stations>()[StationId(0)];
        assert_eq!(station.queue_len(), 2);
        assert_eq!(station.front(), Some(TruckId(0)));
        assert_eq!(station.state, StationState::Admitting);
    }

    runner.run_full(&mut world);

    let fleet = world.resource::<Fleet>();
    assert_eq!(fleet[TruckId(0)].total_wait_time, 0);
    assert_eq!(fleet[TruckId(1)].total_wait_time, 5);
    assert!(fleet.iter().all(|t| t.loads_delivered == 1));

    let report = fleet_report(&world);
    assert_eq!(report.stations[0].total_busy_time, 10);
}

#[test]
fn zero_trucks_complete_without_events() {
    let mut world = TestWorldBuilder::new(0, 2).build();
    let summary = ScheduleRunner::new().run_full(&mut world);

    assert_eq!(summary.events_processed, 0);
    let report = fleet_report(&world);
    assert!(report.trucks.is_empty());
    assert_eq!(report.stations.len(), 2);
    assert!(report.stations.iter().all(|s| s.utilization_pct == 0.0));
}

#[test]
fn zero_trucks_and_zero_stations_complete() {
    let mut world = TestWorldBuilder::new(0, 0).build();
    let summary = ScheduleRunner::new().run_full(&mut world);
    assert_eq!(summary.events_processed, 0);
    assert_eq!(fleet_report(&world).total_loads(), 0);
}

#[test]
fn loads_match_processed_finish_unloading_events() {
    let mut world = TestWorldBuilder::new(10, 3).with_seed(7).build();
    ScheduleRunner::new().run_full(&mut world);

    let metrics = world.resource::<EventMetrics>();
    let fleet = world.resource::<Fleet>();
    for truck in fleet.iter() {
        assert_eq!(truck.loads_delivered, metrics.unloads_for(truck.id));
    }
    assert_eq!(
        fleet.iter().map(|t| t.loads_delivered).sum::<u64>(),
        metrics.count(EventKind::FinishUnloading)
    );
}

#[test]
fn unload_running_past_the_horizon_is_truncated() {
    // Arrive at 90, unload 90..100 with a horizon of 95.
    let mut world = TestWorldBuilder::new(1, 1)
        .with_fixed_mining_time(60)
        .with_unload_time(10)
        .with_horizon(95)
        .build();
    ScheduleRunner::new().run_full(&mut world);

    let station = &world.resource::<Stations>()[StationId(0)];
    assert_eq!(station.state, StationState::Unloading);
    assert_eq!(station.total_busy_time, 10);

    let report = fleet_report(&world);
    assert_eq!(report.stations[0].total_busy_time, 5);
    assert!((report.stations[0].utilization_pct - 5.0 / 95.0 * 100.0).abs() < 1e-9);
    // The truck itself is charged the full unload.
    assert_eq!(report.trucks[0].total_unload_time, 10);
    assert_eq!(report.trucks[0].loads_delivered, 0);
}
