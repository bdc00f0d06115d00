//! parfold CLI entry point

use anyhow::{Context, Result};
use parfold::config::{cli::Cli, cli_convert, validator};
use parfold::{job, output};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let config = cli_convert::build_config(&cli);
    validator::validate_config(&config).context("Invalid arguments")?;
    log::debug!("configuration: {:?}", config);

    let report = job::run(&config)?;
    output::emit(&report, &config)
}

/// Initialize env_logger; `RUST_LOG` overrides the `-v` level
fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(cli_convert::log_level(verbose))
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
