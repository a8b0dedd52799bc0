//! Telemetry / KPIs: per-truck and per-station statistics read from a world.
//!
//! Building a report never mutates the world, so it can be taken at any point
//! of a run and repeated with identical results.

use std::fmt;

use bevy_ecs::prelude::World;
use serde::Serialize;

use crate::clock::{SimTime, SimulationClock};
use crate::ecs::{Fleet, Station, StationState, Stations, Truck, TruckActivity};
use crate::scenario::HaulConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckReport {
    pub id: usize,
    pub loads_delivered: u64,
    pub total_wait_time: SimTime,
    pub total_travel_time: SimTime,
    pub total_mining_time: SimTime,
    pub total_unload_time: SimTime,
    pub stalled: bool,
}

impl TruckReport {
    pub fn from_truck(truck: &Truck) -> Self {
        Self {
            id: truck.id.0,
            loads_delivered: truck.loads_delivered,
            total_wait_time: truck.total_wait_time,
            total_travel_time: truck.total_travel_time,
            total_mining_time: truck.total_mining_time,
            total_unload_time: truck.total_unload_time,
            stalled: truck.activity == TruckActivity::Stalled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub id: usize,
    /// Busy minutes within the horizon.
    pub total_busy_time: SimTime,
    /// `total_busy_time / horizon * 100`.
    pub utilization_pct: f64,
    /// Trucks still queued (including one unloading) when the report was taken.
    pub queue_len: usize,
}

impl StationReport {
    pub fn from_station(station: &Station, horizon: SimTime) -> Self {
        let total_busy_time = busy_time_within(station, horizon);
        Self {
            id: station.id.0,
            total_busy_time,
            utilization_pct: utilization_pct(total_busy_time, horizon),
            queue_len: station.queue_len(),
        }
    }
}

/// An unload still running past the horizon only counts up to the horizon.
pub fn busy_time_within(station: &Station, horizon: SimTime) -> SimTime {
    let overrun = match station.state {
        StationState::Unloading => station.busy_until.saturating_sub(horizon),
        StationState::Idle | StationState::Admitting => 0,
    };
    station.total_busy_time.saturating_sub(overrun)
}

pub fn utilization_pct(busy: SimTime, horizon: SimTime) -> f64 {
    if horizon == 0 {
        return 0.0;
    }
    busy as f64 / horizon as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub horizon: SimTime,
    /// Simulation time of the last processed event.
    pub final_time: SimTime,
    pub trucks: Vec<TruckReport>,
    pub stations: Vec<StationReport>,
}

impl FleetReport {
    pub fn total_loads(&self) -> u64 {
        self.trucks.iter().map(|t| t.loads_delivered).sum()
    }

    pub fn total_wait_time(&self) -> SimTime {
        self.trucks.iter().map(|t| t.total_wait_time).sum()
    }

    pub fn stalled_trucks(&self) -> usize {
        self.trucks.iter().filter(|t| t.stalled).count()
    }
}

/// Collects the report for a built (and usually finished) scenario.
pub fn fleet_report(world: &World) -> FleetReport {
    let horizon = world.resource::<HaulConfig>().horizon;
    FleetReport {
        horizon,
        final_time: world.resource::<SimulationClock>().now(),
        trucks: world
            .resource::<Fleet>()
            .iter()
            .map(TruckReport::from_truck)
            .collect(),
        stations: world
            .resource::<Stations>()
            .iter()
            .map(|s| StationReport::from_station(s, horizon))
            .collect(),
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "==================== Simulation Statistics ===================="
        )?;
        for truck in &self.trucks {
            writeln!(f, "Truck {} Statistics:", truck.id)?;
            writeln!(f, "  Loads Delivered: {}", truck.loads_delivered)?;
            writeln!(f, "  Total Wait Time (min): {}", truck.total_wait_time)?;
            writeln!(f, "  Total Travel Time (min): {}", truck.total_travel_time)?;
            writeln!(f, "  Total Mining Time (min): {}", truck.total_mining_time)?;
            writeln!(f, "  Total Unload Time (min): {}", truck.total_unload_time)?;
            if truck.stalled {
                writeln!(f, "  Stalled: no station available")?;
            }
            writeln!(f)?;
        }
        for station in &self.stations {
            writeln!(f, "Station {} Statistics:", station.id)?;
            writeln!(f, "  Total Busy Time (min): {}", station.total_busy_time)?;
            writeln!(f, "  Utilization: {:.2} %", station.utilization_pct)?;
            writeln!(f)?;
        }
        write!(
            f,
            "==============================================================="
        )
    }
}
