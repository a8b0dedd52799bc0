use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the mining haul simulation workspace",
    long_about = "A unified CLI for running scenarios, the reference suite,\n\
                  benchmarks, and CI checks in the haul simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the default scenario (10 trucks, 3 stations, 72 h)
    Run {
        /// Number of trucks
        #[arg(long, default_value_t = 10)]
        trucks: usize,
        /// Number of unload stations
        #[arg(long, default_value_t = 3)]
        stations: usize,
        /// RNG seed
        #[arg(long, env = "HAUL_SEED")]
        seed: Option<u64>,
    },
    /// Run the reference suite and write results to target/haul
    Suite {
        /// RNG seed shared by every scenario
        #[arg(long, env = "HAUL_SEED", default_value_t = 42)]
        seed: u64,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, scenarios, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in haul_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the reference suite with both dispatch policies
    Scenarios,
    /// Run benchmarks
    Bench,
    /// Run check + scenarios + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    Command::new(program).args(args).status().unwrap_or_else(|err| {
        eprintln!("failed to execute {program}: {err}");
        exit(1);
    })
}

fn run_checked(program: &str, args: &[&str]) {
    let status = spawn(program, args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run_checked("cargo", args);
}

fn run_git(args: &[&str]) {
    run_checked("git", args);
}

fn stash_entries() -> usize {
    let output = Command::new("git")
        .args(["stash", "list"])
        .output()
        .unwrap_or_else(|err| {
            eprintln!("failed to execute git: {err}");
            exit(1);
        });
    count_stash_entries(&String::from_utf8_lossy(&output.stdout))
}

fn count_stash_entries(list: &str) -> usize {
    list.lines().filter(|line| !line.trim().is_empty()).count()
}

/// `git stash push` succeeds without stashing anything on a clean tree.
fn stash_was_created(before: usize, after: usize) -> bool {
    after > before
}

fn run_haul_sim(args: &[&str]) {
    let mut full = vec![
        "run",
        "-p",
        "haul_experiments",
        "--bin",
        "haul_sim",
        "--release",
        "--",
    ];
    full.extend_from_slice(args);
    run_cargo(&full);
}

fn bench_status(extra: &[&str]) -> ExitStatus {
    let mut args = vec!["bench", "--package", "haul_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    spawn("cargo", &args)
}

fn bench(extra: &[&str]) {
    let status = bench_status(extra);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test haul_core");
    run_cargo(&["test", "-p", "haul_core"]);

    step("Test haul_experiments");
    run_cargo(&["test", "-p", "haul_experiments"]);

    step("Test xtask");
    run_cargo(&["test", "-p", "xtask"]);
}

fn ci_scenarios() {
    step("Reference suite (shortest queue)");
    run_haul_sim(&[
        "suite",
        "--seed",
        "42",
        "--policy",
        "shortest-queue",
        "--quiet",
    ]);

    step("Reference suite (projected free)");
    run_haul_sim(&[
        "suite",
        "--seed",
        "42",
        "--policy",
        "projected-free",
        "--quiet",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trucks,
            stations,
            seed,
        } => {
            let trucks = trucks.to_string();
            let stations = stations.to_string();
            let seed = seed.map(|s| s.to_string());
            let mut args: Vec<&str> = vec![
                "run",
                "--trucks",
                trucks.as_str(),
                "--stations",
                stations.as_str(),
            ];
            if let Some(seed) = &seed {
                args.extend_from_slice(&["--seed", seed.as_str()]);
            }
            run_haul_sim(&args);
        }
        Commands::Suite { seed } => {
            let out_dir = Path::new("target/haul");
            if let Err(err) = std::fs::create_dir_all(out_dir) {
                eprintln!("failed to create {}: {err}", out_dir.display());
                exit(1);
            }
            let seed = seed.to_string();
            run_haul_sim(&[
                "suite",
                "--seed",
                seed.as_str(),
                "--json",
                "target/haul/suite.json",
                "--csv",
                "target/haul/suite.csv",
            ]);
        }
        Commands::Bench => bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(err) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove {}: {err}", baseline_dir.display());
                    exit(1);
                }
            }

            step("Stashing current changes");
            let before = stash_entries();
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);
            let stashed = stash_was_created(before, stash_entries());
            if !stashed {
                eprintln!("Working tree is clean; nothing was stashed.");
            }

            step("Running benchmark to create baseline");
            let baseline = bench_status(&["--save-baseline", "main"]);

            if stashed {
                step("Reapplying changes");
                run_git(&["stash", "pop"]);
            }
            if !baseline.success() {
                exit(baseline.code().unwrap_or(1));
            }

            step("Running benchmark comparing against baseline");
            bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Scenarios => ci_scenarios(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_scenarios();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "haul_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
