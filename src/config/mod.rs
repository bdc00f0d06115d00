//! Configuration module
//!
//! Handles CLI argument parsing, conversion into a [`Config`], and validation.
//! There is no configuration file: everything comes from the command line and
//! the `PARFOLD_DATASET` environment variable.

pub mod cli;
pub mod cli_convert;
pub mod validator;

use crate::coordinator::DEFAULT_POOL_SIZE;
use crate::dataset::DatasetSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default number of integers per range-sum sub-range
pub const DEFAULT_CHUNK_SIZE: u64 = 100;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub job: JobConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which job to run, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobConfig {
    /// Sum every integer in `[min, max]`
    RangeSum {
        min: i64,
        max: i64,
        #[serde(default = "default_chunk_size")]
        chunk_size: u64,
    },
    /// Find the location with the smallest total distance to the others
    MeetingPoint {
        locations: Vec<String>,
        /// Dataset path; the bundled sample table when unset
        dataset: Option<PathBuf>,
    },
    /// Print the coordinates the dataset holds for each location
    Lookup {
        locations: Vec<String>,
        dataset: Option<PathBuf>,
    },
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl JobConfig {
    /// Dataset the job reads from, if it reads one at all
    pub fn dataset_source(&self) -> Option<DatasetSource> {
        match self {
            JobConfig::RangeSum { .. } => None,
            JobConfig::MeetingPoint { dataset, .. } | JobConfig::Lookup { dataset, .. } => Some(
                dataset
                    .clone()
                    .map(DatasetSource::File)
                    .unwrap_or(DatasetSource::Bundled),
            ),
        }
    }
}

impl fmt::Display for JobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobConfig::RangeSum { min, max, .. } => write!(f, "range-sum [{}, {}]", min, max),
            JobConfig::MeetingPoint { locations, .. } => {
                write!(f, "meeting-point over {} location(s)", locations.len())
            }
            JobConfig::Lookup { locations, .. } => {
                write!(f, "lookup of {} location(s)", locations.len())
            }
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads (upper bound; empty buckets get none)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_threads() -> usize {
    DEFAULT_POOL_SIZE
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

/// Rendering of the final report on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also write the JSON report to this file
    pub json_output: Option<PathBuf>,
}
