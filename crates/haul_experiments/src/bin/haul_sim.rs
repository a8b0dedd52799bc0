//! Run a single haul scenario or the reference suite and print statistics.
//!
//! Run with: cargo run -p haul_experiments --bin haul_sim -- run --trucks 10 --stations 3

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use haul_core::dispatch::DispatchPolicyKind;
use haul_core::scenario::{load_params, HaulParams};
use haul_experiments::{
    export_to_csv, export_to_json, reference_suite, run_scenario, run_suite, ScenarioOutcome,
    SimulationResult,
};

#[derive(Parser)]
#[command(
    name = "haul_sim",
    about = "Discrete-event simulation of mining trucks cycling between a site and unload stations"
)]
struct Cli {
    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scenario
    Run {
        /// Number of trucks
        #[arg(long)]
        trucks: Option<usize>,
        /// Number of unload stations
        #[arg(long)]
        stations: Option<usize>,
        /// TOML file with scenario parameters; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Run the reference suite of fleet/station combinations
    Suite {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// RNG seed; omit for an entropy-seeded run
    #[arg(long, env = "HAUL_SEED")]
    seed: Option<u64>,
    /// Station dispatch policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Simulation horizon in minutes
    #[arg(long)]
    horizon: Option<u64>,
    /// Write aggregated results as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write aggregated results as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Only print the aggregated summary line per scenario
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Fewest trucks queued, lowest id on ties
    ShortestQueue,
    /// Earliest projected free unload slot
    ProjectedFree,
}

impl From<PolicyArg> for DispatchPolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ShortestQueue => DispatchPolicyKind::ShortestQueueLength,
            PolicyArg::ProjectedFree => DispatchPolicyKind::EarliestProjectedFree,
        }
    }
}

impl CommonArgs {
    fn apply(&self, mut params: HaulParams) -> HaulParams {
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        if let Some(policy) = self.policy {
            params = params.with_dispatch_policy(policy.into());
        }
        if let Some(horizon) = self.horizon {
            params = params.with_horizon(horizon);
        }
        params
    }
}

fn print_outcome(outcome: &ScenarioOutcome, quiet: bool) {
    let m = &outcome.metrics;
    if !quiet {
        println!(
            "==== {}: {} trucks, {} stations ====",
            outcome.name, m.num_trucks, m.num_stations
        );
        println!("{}", outcome.report);
    }
    println!(
        "{:18} loads={:5} avg_wait={:8.1} min  avg_util={:6.2} %  stalled={}  events={}",
        outcome.name,
        m.total_loads,
        m.avg_wait_per_truck,
        m.avg_station_utilization_pct,
        m.stalled_trucks,
        m.events_processed,
    );
}

fn write_outputs(
    outcomes: &[ScenarioOutcome],
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<SimulationResult> = outcomes.iter().map(|o| o.metrics.clone()).collect();
    if let Some(path) = &common.json {
        export_to_json(&results, path)?;
        tracing::info!(path = %path.display(), "wrote JSON results");
    }
    if let Some(path) = &common.csv {
        export_to_csv(&results, path)?;
        tracing::info!(path = %path.display(), "wrote CSV results");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let (outcomes, common) = match &cli.command {
        Commands::Run {
            trucks,
            stations,
            config,
            common,
        } => {
            let mut params = match config {
                Some(path) => {
                    tracing::info!(path = %path.display(), "loading scenario config");
                    load_params(path)?
                }
                None => HaulParams::default(),
            };
            if let Some(trucks) = trucks {
                params.num_trucks = *trucks;
            }
            if let Some(stations) = stations {
                params.num_stations = *stations;
            }
            let params = common.apply(params);
            let name = format!("run-{}x{}", params.num_trucks, params.num_stations);
            (vec![run_scenario(&name, &params)?], common)
        }
        Commands::Suite { common } => {
            let base = common.apply(HaulParams::default());
            (run_suite(&reference_suite(&base))?, common)
        }
    };

    for outcome in &outcomes {
        print_outcome(outcome, common.quiet);
    }
    write_outputs(&outcomes, common)?;
    Ok(())
}
