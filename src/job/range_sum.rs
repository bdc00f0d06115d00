//! Distributed integer range sum
//!
//! The interval above `min` is cut into fixed-size sub-ranges which are spread
//! round-robin over the pool. Each worker accumulates its sub-ranges directly;
//! the coordinator seeds its sum with `min` and adds every subtotal.

use crate::coordinator::Coordinator;
use crate::metric::{closed_form_sum, sum_range};
use crate::partition::{chunk_range, SubRange};
use crate::stats::aggregator::SumAggregate;
use crate::stats::RunSummary;
use crate::worker::{Job, WorkerError};
use serde::Serialize;
use std::sync::Arc;

/// Sums the sub-ranges of one bucket
pub struct RangeSumJob;

impl Job for RangeSumJob {
    type Item = SubRange;
    type Context = ();
    type Partial = i128;

    fn execute(worker_id: usize, bucket: &[SubRange], _ctx: &()) -> anyhow::Result<i128> {
        let subtotal: i128 = bucket.iter().map(|range| sum_range(*range)).sum();
        log::debug!(
            "worker {} summed {} sub-range(s) to {}",
            worker_id,
            bucket.len(),
            subtotal
        );
        Ok(subtotal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSumReport {
    pub min: i64,
    pub max: i64,
    /// Distributed sum of every integer in `[min, max]`
    pub sum: i128,
    /// `sum / (max - min)`, the width of the interval
    pub average: f64,
    /// Closed-form reference value
    pub check_sum: i128,
}

impl RangeSumReport {
    pub fn new(min: i64, max: i64, sum: i128) -> Self {
        Self {
            min,
            max,
            sum,
            average: average(sum, min, max),
            check_sum: closed_form_sum(min, max),
        }
    }

    /// Whether the distributed sum agrees with the closed form
    pub fn verified(&self) -> bool {
        self.sum == self.check_sum
    }
}

/// Average of `[min, max]` given its sum
///
/// The divisor is the interval width `max - min`, not the integer count, so
/// `[1, 10]` averages to `55 / 9`. Validation guarantees `min < max`.
pub fn average(sum: i128, min: i64, max: i64) -> f64 {
    let width = max as i128 - min as i128;
    sum as f64 / width as f64
}

/// Sum `[min, max]` across the coordinator's pool
///
/// `min < max` and `chunk_size >= 1` are checked by validation beforehand.
pub fn run(
    coordinator: &Coordinator,
    min: i64,
    max: i64,
    chunk_size: u64,
) -> Result<(RangeSumReport, RunSummary), WorkerError> {
    let chunks = chunk_range(min, max, chunk_size);
    log::info!(
        "split ({}, {}] into {} sub-range(s) of up to {}",
        min,
        max,
        chunks.len(),
        chunk_size
    );

    let completed =
        coordinator.run::<RangeSumJob, _>(chunks, Arc::new(()), SumAggregate::new(min))?;

    let report = RangeSumReport::new(min, max, completed.aggregate.total());
    if !report.verified() {
        log::warn!(
            "distributed sum {} differs from closed form {}",
            report.sum,
            report.check_sum
        );
    }

    Ok((report, completed.summary))
}
