//! CLI to Config conversion utilities

use crate::config::cli::{Cli, Command, FormatArg};
use crate::config::{Config, JobConfig, OutputConfig, OutputFormat, WorkerConfig};
use log::LevelFilter;

/// Build a run configuration from parsed CLI arguments
///
/// No validation happens here; see [`crate::config::validator`].
pub fn build_config(cli: &Cli) -> Config {
    let job = match &cli.command {
        Command::Sum { min, max, chunk_size } => JobConfig::RangeSum {
            min: *min,
            max: *max,
            chunk_size: *chunk_size,
        },
        Command::Meet { locations, dataset } => JobConfig::MeetingPoint {
            locations: locations.clone(),
            dataset: dataset.clone(),
        },
        Command::Lookup { locations, dataset } => JobConfig::Lookup {
            locations: locations.clone(),
            dataset: dataset.clone(),
        },
    };

    Config {
        job,
        workers: WorkerConfig { threads: cli.threads },
        output: OutputConfig {
            format: convert_format(cli.format),
            json_output: cli.json_output.clone(),
        },
    }
}

/// Convert CLI format to config format
pub fn convert_format(format: FormatArg) -> OutputFormat {
    match format {
        FormatArg::Text => OutputFormat::Text,
        FormatArg::Json => OutputFormat::Json,
    }
}

/// Map the `-v` count to a log level
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
