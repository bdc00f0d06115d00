//! Job implementations
//!
//! Each job turns its configuration into a work set and a read-only context,
//! hands both to the [`Coordinator`], and turns the final aggregate into a
//! report.
//!
//! - **range_sum**: distributed sum of an integer interval
//! - **meeting_point**: location with the smallest total great-circle distance
//! - **lookup**: dataset probe, no workers involved

pub mod lookup;
pub mod meeting_point;
pub mod range_sum;

use crate::config::{Config, JobConfig};
use crate::coordinator::Coordinator;
use crate::dataset;
use crate::stats::RunSummary;
use anyhow::{Context, Result};
use serde::Serialize;

pub use lookup::LookupReport;
pub use meeting_point::{MeetingPointJob, MeetingPointReport};
pub use range_sum::{RangeSumJob, RangeSumReport};

/// Final result of one job
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum JobReport {
    RangeSum(RangeSumReport),
    MeetingPoint(MeetingPointReport),
    Lookup(LookupReport),
}

/// A job report plus run bookkeeping (absent for jobs that spawn no workers)
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub job: JobReport,
    pub run: Option<RunSummary>,
}

/// Run the configured job to completion
///
/// The configuration must already have passed validation.
pub fn run(config: &Config) -> Result<Report> {
    let coordinator = Coordinator::new(config.workers.threads);
    log::info!("running {} with up to {} worker(s)", config.job, coordinator.pool_size());

    match &config.job {
        JobConfig::RangeSum { min, max, chunk_size } => {
            let (report, summary) = range_sum::run(&coordinator, *min, *max, *chunk_size)
                .context("range-sum run failed")?;
            Ok(Report {
                job: JobReport::RangeSum(report),
                run: Some(summary),
            })
        }
        JobConfig::MeetingPoint { locations, .. } => {
            let lookup = load_locations(config, locations)?;
            let (report, summary) = meeting_point::run(&coordinator, lookup)?;
            Ok(Report {
                job: JobReport::MeetingPoint(report),
                run: Some(summary),
            })
        }
        JobConfig::Lookup { locations, .. } => {
            let lookup = load_locations(config, locations)?;
            Ok(Report {
                job: JobReport::Lookup(LookupReport::from_lookup(&lookup)),
                run: None,
            })
        }
    }
}

fn load_locations(config: &Config, locations: &[String]) -> Result<dataset::Lookup> {
    let source = config
        .job
        .dataset_source()
        .unwrap_or(dataset::DatasetSource::Bundled);

    let lookup = dataset::load(&source, locations).context("failed to load city dataset")?;
    for name in &lookup.missing {
        log::warn!("location '{}' not found in dataset, skipping", name);
    }
    Ok(lookup)
}
