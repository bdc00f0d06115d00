//! JSON output formatting
//!
//! Serializes a finished run as one document:
//! - The job result (tagged by job kind)
//! - Run bookkeeping: executors, partials, elapsed time
//! - The configuration that produced it

use crate::config::Config;
use crate::job::{JobReport, Report};
use crate::stats::RunSummary;
use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        let micros = d.as_micros() as u64;
        let human = format_duration_human(d);
        Self { micros, human }
    }
}

/// Run bookkeeping
#[derive(Debug, Clone, Serialize)]
pub struct JsonRun {
    pub executors: usize,
    pub partials: usize,
    pub elapsed: JsonDuration,
}

impl From<&RunSummary> for JsonRun {
    fn from(summary: &RunSummary) -> Self {
        Self {
            executors: summary.executors,
            partials: summary.partials,
            elapsed: JsonDuration::from_duration(summary.elapsed),
        }
    }
}

/// Complete JSON document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub result: &'a JobReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<JsonRun>,
    pub config: &'a Config,
}

/// Assemble the JSON document for a report
pub fn build_json_report<'a>(report: &'a Report, config: &'a Config) -> JsonReport<'a> {
    JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        result: &report.job,
        run: report.run.as_ref().map(JsonRun::from),
        config,
    }
}

/// Serialize the document to a string
pub fn to_json_string(doc: &JsonReport<'_>, pretty: bool) -> Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    Ok(s)
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, doc: &JsonReport<'_>, pretty: bool) -> Result<()> {
    let file = BufWriter::new(File::create(output_path)?);

    if pretty {
        serde_json::to_writer_pretty(file, doc)?;
    } else {
        serde_json::to_writer(file, doc)?;
    }

    Ok(())
}

/// Format duration in human-readable format
fn format_duration_human(d: Duration) -> String {
    let micros = d.as_micros() as u64;

    if micros == 0 {
        return "0µs".to_string();
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.3}ms", micros as f64 / 1000.0)
    } else if micros < 60_000_000 {
        format!("{:.3}s", micros as f64 / 1_000_000.0)
    } else {
        format!("{:.2}m", micros as f64 / 60_000_000.0)
    }
}
