use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod commands;
mod logging;

#[derive(Parser)]
#[command(
    name = "podsim",
    about = "Discrete-event simulation of an autoscaling pod cluster",
    version,
    propagate_version = true
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print its samples as a JSON array.
    ///
    /// The configuration is a JSON object overriding any subset of the
    /// defaults. Flags override the file.
    Run(RunArgs),
    /// Run a predefined parameter space in parallel and export the results
    Sweep(SweepArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Configuration file, or `-` for stdin
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    runtime: Option<f64>,
    #[arg(long)]
    request_interval: Option<f64>,
    #[arg(long)]
    initial_pods: Option<usize>,
    #[arg(long)]
    scaling_time: Option<f64>,
    /// Seed for latency jitter
    #[arg(long)]
    seed: Option<u64>,
    /// Pretty-print the samples
    #[arg(long)]
    pretty: bool,
    /// Also write the samples as CSV, one row per pod
    #[arg(long)]
    samples_csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SpaceName {
    Minimal,
    Scaling,
    Capacity,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Parquet,
}

#[derive(Args)]
pub struct SweepArgs {
    #[arg(value_enum, default_value_t = SpaceName::Minimal)]
    space: SpaceName,
    /// Output file
    #[arg(short, long, env = "PODSIM_OUTPUT", default_value = "sweep_results.csv")]
    output: PathBuf,
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,
    /// Worker threads; rayon's default when unset
    #[arg(short, long, env = "PODSIM_THREADS")]
    threads: Option<usize>,
    /// Sample this many random points instead of the full grid
    #[arg(long)]
    random: Option<usize>,
    /// Seed for random sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.json_logs)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Sweep(args) => commands::sweep::execute(&args),
    }
}
