//! Result aggregation
//!
//! Partial results arrive at the coordinator one at a time and are folded into
//! an [`Aggregate`]. The coordinator is the aggregate's only owner, so folding
//! needs no synchronization.
//!
//! # Reductions
//!
//! - **Sum** ([`aggregator::SumAggregate`]): seeded, associative and
//!   commutative, so arrival order is irrelevant
//! - **Min with argmin** ([`aggregator::MinDistanceAggregate`]): strict
//!   improvement only, ties resolved by work-set order

pub mod aggregator;

use std::time::Duration;

/// Incremental fold of partial results
pub trait Aggregate<P> {
    /// Fold one executor's partial result into the running aggregate
    fn fold(&mut self, worker_id: usize, partial: P);
}

/// Bookkeeping for one completed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Executors spawned (one per non-empty bucket)
    pub executors: usize,
    /// Partial results folded
    pub partials: usize,
    /// Wall-clock time from dispatch to the last termination
    pub elapsed: Duration,
}
