//! Aggregate metrics for one simulation run.

use haul_core::clock::SimTime;
use haul_core::runner::RunSummary;
use haul_core::telemetry::FleetReport;

/// Aggregated figures from a single simulation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimulationResult {
    pub scenario: String,
    pub num_trucks: usize,
    pub num_stations: usize,
    pub horizon: SimTime,
    /// Loads delivered by the whole fleet.
    pub total_loads: u64,
    pub avg_loads_per_truck: f64,
    /// Mean of the trucks' total waiting times, in minutes.
    pub avg_wait_per_truck: f64,
    pub max_wait: SimTime,
    pub avg_station_utilization_pct: f64,
    pub max_station_utilization_pct: f64,
    pub stalled_trucks: usize,
    pub events_processed: u64,
    pub events_discarded: usize,
    pub final_time: SimTime,
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Condense a report and run summary into one row of results.
pub fn extract_metrics(scenario: &str, report: &FleetReport, summary: &RunSummary) -> SimulationResult {
    let num_trucks = report.trucks.len();
    let num_stations = report.stations.len();
    let total_loads = report.total_loads();

    SimulationResult {
        scenario: scenario.to_string(),
        num_trucks,
        num_stations,
        horizon: report.horizon,
        total_loads,
        avg_loads_per_truck: mean(total_loads as f64, num_trucks),
        avg_wait_per_truck: mean(report.total_wait_time() as f64, num_trucks),
        max_wait: report
            .trucks
            .iter()
            .map(|t| t.total_wait_time)
            .max()
            .unwrap_or(0),
        avg_station_utilization_pct: mean(
            report.stations.iter().map(|s| s.utilization_pct).sum(),
            num_stations,
        ),
        max_station_utilization_pct: report
            .stations
            .iter()
            .map(|s| s.utilization_pct)
            .fold(0.0, f64::max),
        stalled_trucks: report.stalled_trucks(),
        events_processed: summary.events_processed,
        events_discarded: summary.events_discarded,
        final_time: summary.final_time,
    }
}
