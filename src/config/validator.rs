//! Configuration validation
//!
//! Everything here runs before any worker is spawned, so a bad configuration
//! never reaches the concurrent phase.

use super::*;
use thiserror::Error;

/// Fewest locations a meeting-point run accepts
pub const MIN_LOCATIONS: usize = 1;
/// Most locations a meeting-point run accepts
pub const MAX_LOCATIONS: usize = 10;
/// Upper bound on the worker pool
pub const MAX_THREADS: usize = 64;
/// Most sub-ranges a range-sum run may be cut into
pub const MAX_SUB_RANGES: u128 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("threads must be between 1 and 64, got {0}")]
    Threads(usize),

    #[error("chunk_size must be at least 1")]
    ChunkSize,

    #[error("min ({min}) must be less than max ({max})")]
    EmptyRange { min: i64, max: i64 },

    #[error("range splits into {0} sub-ranges, at most 1000000 are allowed; raise chunk_size")]
    TooManySubRanges(u128),

    #[error("at least 1 location is needed")]
    TooFewLocations,

    #[error("max 10 locations are allowed, got {0}")]
    TooManyLocations(usize),

    #[error("location name at position {0} is empty")]
    BlankLocation(usize),
}

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<(), ValidationError> {
    validate_workers(&config.workers)?;
    validate_job(&config.job)?;
    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<(), ValidationError> {
    if workers.threads == 0 || workers.threads > MAX_THREADS {
        return Err(ValidationError::Threads(workers.threads));
    }
    Ok(())
}

/// Validate job parameters
pub fn validate_job(job: &JobConfig) -> Result<(), ValidationError> {
    match job {
        JobConfig::RangeSum { min, max, chunk_size } => {
            if min >= max {
                return Err(ValidationError::EmptyRange { min: *min, max: *max });
            }
            if *chunk_size == 0 {
                return Err(ValidationError::ChunkSize);
            }
            let sub_ranges = sub_range_count(*min, *max, *chunk_size);
            if sub_ranges > MAX_SUB_RANGES {
                return Err(ValidationError::TooManySubRanges(sub_ranges));
            }
        }
        JobConfig::MeetingPoint { locations, .. } => {
            validate_locations(locations)?;
            if locations.len() > MAX_LOCATIONS {
                return Err(ValidationError::TooManyLocations(locations.len()));
            }
        }
        JobConfig::Lookup { locations, .. } => validate_locations(locations)?,
    }
    Ok(())
}

/// Number of sub-ranges `(min, max]` is cut into
fn sub_range_count(min: i64, max: i64, chunk_size: u64) -> u128 {
    let width = (max as i128 - min as i128) as u128;
    let chunk_size = chunk_size as u128;
    (width + chunk_size - 1) / chunk_size
}

fn validate_locations(locations: &[String]) -> Result<(), ValidationError> {
    if locations.len() < MIN_LOCATIONS {
        return Err(ValidationError::TooFewLocations);
    }
    if let Some(pos) = locations.iter().position(|l| l.trim().is_empty()) {
        return Err(ValidationError::BlankLocation(pos + 1));
    }
    Ok(())
}
