use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the pod cluster simulation workspace",
    long_about = "A unified CLI for running simulations, sweeps, benchmarks,\n\
                  and CI checks in the pod cluster simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the default scenario and print a summary
    Run,
    /// Run a long, high-rate scenario
    RunLarge,
    /// Run a parameter sweep through the podsim CLI
    Sweep {
        /// Predefined space: minimal, scaling or capacity
        #[arg(default_value = "scaling")]
        space: String,
        /// Output file path
        #[arg(long, default_value = "sweep_results.csv")]
        output: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in sim_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run example scenarios
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute {program}: {err}");
            exit(1);
        }
    }
}

fn run_cargo(args: &[&str]) {
    let status = spawn("cargo", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = spawn("git", args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_example(name: &str) {
    run_cargo(&["run", "-p", "sim_core", "--example", name, "--release"]);
}

fn bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "sim_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
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

    for package in ["sim_core", "sim_experiments", "sim_cli"] {
        step(&format!("Test {package}"));
        run_cargo(&["test", "-p", package]);
    }
}

fn ci_examples() {
    step("Run scenario_run (default cluster)");
    run_example("scenario_run");

    step("Run scenario_run_large (10K time units, 0.05 interval)");
    run_example("scenario_run_large");

    step("Run podsim sweep (minimal space)");
    run_cargo(&[
        "run",
        "-p",
        "sim_cli",
        "--release",
        "--",
        "sweep",
        "minimal",
        "--no-progress",
        "--format",
        "json",
        "--output",
        "target/ci_sweep.json",
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
        Commands::Run => run_example("scenario_run"),
        Commands::RunLarge => run_example("scenario_run_large"),
        Commands::Sweep { space, output } => {
            run_cargo(&[
                "run", "-p", "sim_cli", "--release", "--", "sweep", &space, "--output", &output,
            ]);
        }
        Commands::Bench => bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(err) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {err}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "sim_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
