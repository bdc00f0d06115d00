//! CLI argument parsing using clap

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::coordinator::DEFAULT_POOL_SIZE;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// parfold - split work across a fixed thread pool and fold the results
#[derive(Parser, Debug)]
#[command(name = "parfold")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = DEFAULT_POOL_SIZE, global = true)]
    pub threads: usize,

    /// Output format for the final report
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Also write the JSON report to this file
    #[arg(long, global = true)]
    pub json_output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sum all integers from MIN to MAX
    Sum {
        /// Lower bound (inclusive)
        #[arg(allow_negative_numbers = true)]
        min: i64,

        /// Upper bound (inclusive), must be greater than MIN
        #[arg(allow_negative_numbers = true)]
        max: i64,

        /// Integers per sub-range handed to a worker
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: u64,
    },

    /// Find the location with the smallest total distance to all others
    Meet {
        /// 1 to 10 location names (case-insensitive)
        #[arg(value_name = "LOCATION")]
        locations: Vec<String>,

        /// Tab-separated GeoNames city table (bundled sample if unset)
        #[arg(long, env = "PARFOLD_DATASET")]
        dataset: Option<PathBuf>,
    },

    /// Show the coordinates the dataset holds for each location
    Lookup {
        #[arg(value_name = "LOCATION")]
        locations: Vec<String>,

        /// Tab-separated GeoNames city table (bundled sample if unset)
        #[arg(long, env = "PARFOLD_DATASET")]
        dataset: Option<PathBuf>,
    },
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable lines
    Text,
    /// A single JSON document
    Json,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
