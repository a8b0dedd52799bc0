//! Scenario runs and result export for the haul-cycle simulation.
//!
//! - [`runner`]: build, run and report a single scenario or a whole suite
//! - [`suite`]: the reference fleet/station combinations
//! - [`metrics`]: aggregate figures for one run
//! - [`export`]: CSV/JSON output
//!
//! ```no_run
//! use haul_core::scenario::HaulParams;
//! use haul_experiments::{export_to_json, reference_suite, run_suite};
//!
//! let cases = reference_suite(&HaulParams::default().with_seed(7));
//! let outcomes = run_suite(&cases).unwrap();
//! let results: Vec<_> = outcomes.iter().map(|o| o.metrics.clone()).collect();
//! export_to_json(&results, "suite.json").unwrap();
//! ```

pub mod export;
pub mod metrics;
pub mod runner;
pub mod suite;

pub use export::{export_to_csv, export_to_json};
pub use metrics::SimulationResult;
pub use runner::{run_scenario, run_suite, ScenarioOutcome};
pub use suite::{reference_suite, ScenarioCase};
