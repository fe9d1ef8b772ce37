use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use sim_core::scenario::SimulationConfig;
use sim_core::Simulation;
use tracing::info;

use crate::RunArgs;

/// Reads a JSON configuration from `path`, or stdin when `path` is `-`.
pub fn load_config(path: &Path) -> anyhow::Result<SimulationConfig> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading configuration from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?
    };
    parse_config(&text)
}

pub fn parse_config(text: &str) -> anyhow::Result<SimulationConfig> {
    if text.trim().is_empty() {
        return Ok(SimulationConfig::default());
    }
    serde_json::from_str(text).context("parsing configuration JSON")
}

fn apply_overrides(mut config: SimulationConfig, args: &RunArgs) -> SimulationConfig {
    if let Some(runtime) = args.runtime {
        config.runtime = runtime;
    }
    if let Some(interval) = args.request_interval {
        config.request_interval = interval;
    }
    if let Some(pods) = args.initial_pods {
        config.total_initial_pods = pods;
    }
    if let Some(scaling_time) = args.scaling_time {
        config.scaling_time = scaling_time;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config
}

pub fn execute(args: &RunArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let config = apply_overrides(config, args);

    let mut simulation = Simulation::new(&config)?;
    simulation.run_to_end()?;
    simulation.metrics().log_summary();

    let samples = simulation.into_samples();
    if let Some(path) = &args.samples_csv {
        sim_experiments::export_samples_to_csv(&samples, path)
            .map_err(|err| anyhow::anyhow!("{err}"))
            .with_context(|| format!("writing samples to {}", path.display()))?;
        info!(path = %path.display(), "samples exported");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &samples)?;
    } else {
        serde_json::to_writer(&mut out, &samples)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_the_default_config() {
        assert_eq!(parse_config("  \n").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn partial_config_overrides_defaults() {
        let config = parse_config(r#"{"scaling_time": 3, "seed": 9}"#).unwrap();
        assert_eq!(config.scaling_time, 3.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.runtime, 50.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = parse_config("{\"runtime\": \"long\"}").unwrap_err();
        assert!(format!("{err:#}").contains("parsing configuration JSON"));
    }

    #[test]
    fn flags_override_file_values() {
        let args = RunArgs {
            config: None,
            runtime: Some(10.0),
            request_interval: None,
            initial_pods: Some(5),
            scaling_time: None,
            seed: Some(1),
            pretty: false,
            samples_csv: None,
        };
        let config = apply_overrides(SimulationConfig::default().with_request_interval(2.0), &args);
        assert_eq!(config.runtime, 10.0);
        assert_eq!(config.request_interval, 2.0);
        assert_eq!(config.total_initial_pods, 5);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn config_file_is_read() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"runtime": 12}"#).unwrap();
        assert_eq!(load_config(file.path()).unwrap().runtime, 12.0);
    }
}
