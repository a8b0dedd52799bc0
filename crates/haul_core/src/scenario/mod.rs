//! Scenario setup: validate parameters and populate the world with the fleet,
//! stations, clock, sampler and dispatch policy.

mod build;
mod params;

pub use build::{build_scenario, create_dispatch_policy};
pub use params::{load_params, HaulConfig, HaulParams, ParamsError};
