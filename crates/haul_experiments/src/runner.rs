//! Sequential scenario execution.

use bevy_ecs::prelude::World;
use haul_core::runner::{initialize_simulation, run_to_horizon, simulation_schedule, RunSummary};
use haul_core::scenario::{build_scenario, HaulParams, ParamsError};
use haul_core::telemetry::{fleet_report, FleetReport};
use tracing::info;

use crate::metrics::{extract_metrics, SimulationResult};
use crate::suite::ScenarioCase;

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub summary: RunSummary,
    pub report: FleetReport,
    pub metrics: SimulationResult,
}

/// Build, run to the horizon and report one scenario.
pub fn run_scenario(name: &str, params: &HaulParams) -> Result<ScenarioOutcome, ParamsError> {
    let mut world = World::new();
    build_scenario(&mut world, params)?;
    initialize_simulation(&mut world);

    let mut schedule = simulation_schedule();
    let summary = run_to_horizon(&mut world, &mut schedule);
    let report = fleet_report(&world);
    let metrics = extract_metrics(name, &report, &summary);
    info!(
        scenario = name,
        loads = metrics.total_loads,
        avg_wait = metrics.avg_wait_per_truck,
        "scenario complete"
    );

    Ok(ScenarioOutcome {
        name: name.to_string(),
        summary,
        report,
        metrics,
    })
}

/// Run every case in order, stopping at the first invalid one.
pub fn run_suite(cases: &[ScenarioCase]) -> Result<Vec<ScenarioOutcome>, ParamsError> {
    cases
        .iter()
        .map(|case| run_scenario(&case.name, &case.params))
        .collect()
}
