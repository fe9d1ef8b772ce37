use anyhow::Context;
use sim_experiments::parameter_spaces::{capacity_space, minimal_space, scaling_space};
use sim_experiments::runner::run_parallel_experiments_with_progress;
use sim_experiments::{
    export_to_csv, export_to_json, export_to_parquet, find_best_parameters, CapacityWeights,
    ParameterSpace,
};
use tracing::info;

use crate::{ExportFormat, SpaceName, SweepArgs};

fn space(name: SpaceName) -> ParameterSpace {
    match name {
        SpaceName::Minimal => minimal_space(),
        SpaceName::Scaling => scaling_space(),
        SpaceName::Capacity => capacity_space(),
    }
}

pub fn execute(args: &SweepArgs) -> anyhow::Result<()> {
    let space = space(args.space);
    let parameter_sets = match args.random {
        Some(count) => space.sample_random(count, args.seed),
        None => space.generate(),
    };
    anyhow::ensure!(!parameter_sets.is_empty(), "parameter space has no valid points");
    info!(runs = parameter_sets.len(), "generated parameter sets");

    let results =
        run_parallel_experiments_with_progress(&parameter_sets, args.threads, !args.no_progress)?;

    if let Some(best) = find_best_parameters(&results, &parameter_sets, &CapacityWeights::default())
    {
        info!(
            experiment_id = %best.experiment_id,
            initial_pods = best.config.total_initial_pods,
            scaling_time = best.config.scaling_time,
            request_interval = best.config.request_interval,
            pod_cpu_limit = best.config.pod_cpu_limit,
            pod_memory_limit = best.config.pod_memory_limit,
            "best configuration"
        );
    }

    let exported = match args.format {
        ExportFormat::Json => export_to_json(&results, &args.output),
        ExportFormat::Csv => export_to_csv(&results, &parameter_sets, &args.output),
        ExportFormat::Parquet => export_to_parquet(&results, &args.output),
    };
    exported
        .map_err(|err| anyhow::anyhow!("{err}"))
        .with_context(|| format!("exporting results to {}", args.output.display()))?;
    info!(path = %args.output.display(), "results exported");
    Ok(())
}
