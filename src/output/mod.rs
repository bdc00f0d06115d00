//! Report output
//!
//! - **text**: the human-readable lines printed by default
//! - **json**: a single JSON document, on stdout and/or in a file

pub mod json;
pub mod text;

use crate::config::{Config, OutputFormat};
use crate::job::Report;
use crate::Result;
use anyhow::Context;

/// Render the report on stdout in the configured format, and write the JSON
/// file if one was requested
pub fn emit(report: &Report, config: &Config) -> Result<()> {
    match config.output.format {
        OutputFormat::Text => text::print_report(report).context("failed to write report")?,
        OutputFormat::Json => {
            let doc = json::build_json_report(report, config);
            println!("{}", json::to_json_string(&doc, true)?);
        }
    }

    if let Some(path) = &config.output.json_output {
        let doc = json::build_json_report(report, config);
        json::write_json_output(path, &doc, true)
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        log::info!("JSON report written to {}", path.display());
    }

    Ok(())
}
