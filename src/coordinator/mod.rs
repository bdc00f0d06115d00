//! Coordinator module
//!
//! Orchestrates workers and aggregates results.
//!
//! The coordinator partitions the work set, spawns a [`WorkerPool`], and then
//! drains the pool's event channel in its own loop. That loop is the only place
//! the aggregate is mutated. A live set of spawned-but-not-terminated executors
//! decides when the run is over: the aggregate is finalized once the set is
//! empty, and never before.
//!
//! # Failure Policy
//!
//! Executor failure is fatal. A `Failed` event aborts the run with the reported
//! reason, and a channel that disconnects while executors are still live aborts
//! with [`WorkerError::Vanished`] instead of waiting forever.

use crate::partition::round_robin;
use crate::stats::{Aggregate, RunSummary};
use crate::worker::{Job, WorkerError, WorkerEvent, WorkerPool};
use crossbeam::channel::Receiver;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Default number of executors
pub const DEFAULT_POOL_SIZE: usize = 5;

/// A finished run: the final aggregate plus bookkeeping
#[derive(Debug)]
pub struct Completed<A> {
    pub aggregate: A,
    pub summary: RunSummary,
}

/// Partition / dispatch / reduce driver
#[derive(Debug, Clone, Copy)]
pub struct Coordinator {
    pool_size: usize,
}

impl Coordinator {
    pub fn new(pool_size: usize) -> Self {
        Self { pool_size }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Run a job over `items` and fold every partial result into `aggregate`
    ///
    /// Items are split round-robin into at most `pool_size` buckets; one
    /// executor is spawned per non-empty bucket. Returns once every executor
    /// has signalled termination and its thread has been joined.
    ///
    /// # Errors
    ///
    /// Any [`WorkerError`]: spawn failure, a failed executor, or an executor
    /// that disappeared without terminating.
    pub fn run<J, A>(
        &self,
        items: Vec<J::Item>,
        context: Arc<J::Context>,
        mut aggregate: A,
    ) -> Result<Completed<A>, WorkerError>
    where
        J: Job,
        A: Aggregate<J::Partial>,
    {
        let start = Instant::now();
        let item_count = items.len();
        let buckets = round_robin(items, self.pool_size);

        let pool = WorkerPool::<J>::spawn(buckets, context)?;
        log::info!(
            "dispatched {} item(s) to {} worker(s) (pool size {})",
            item_count,
            pool.size(),
            self.pool_size
        );

        let partials = collect(pool.events(), pool.worker_ids(), &mut aggregate)?;
        let executors = pool.size();
        pool.join()?;

        let summary = RunSummary {
            executors,
            partials,
            elapsed: start.elapsed(),
        };
        log::info!(
            "all {} worker(s) terminated after {:?}",
            summary.executors,
            summary.elapsed
        );

        Ok(Completed { aggregate, summary })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

/// Drain executor events until every worker in `live` has terminated
///
/// Partials are folded as they arrive; an executor only counts as done once its
/// `Terminated` event is seen, even if its partial came earlier. Events from
/// workers outside the live set are logged and dropped. Returns the number of
/// partials folded.
///
/// # Errors
///
/// - [`WorkerError::Failed`] on the first `Failed` event
/// - [`WorkerError::Vanished`] if the channel disconnects while workers are live
pub fn collect<P, A>(
    events: &Receiver<WorkerEvent<P>>,
    live: impl IntoIterator<Item = usize>,
    aggregate: &mut A,
) -> Result<usize, WorkerError>
where
    A: Aggregate<P>,
{
    let mut live: BTreeSet<usize> = live.into_iter().collect();
    let mut partials = 0;

    while !live.is_empty() {
        let event = events
            .recv()
            .map_err(|_| WorkerError::Vanished { live: live.len() })?;

        match event {
            WorkerEvent::Partial { worker_id, partial } => {
                if !live.contains(&worker_id) {
                    log::warn!("ignoring partial from unknown worker {}", worker_id);
                    continue;
                }
                aggregate.fold(worker_id, partial);
                partials += 1;
            }
            WorkerEvent::Failed { worker_id, reason } => {
                log::error!("worker {} failed: {}", worker_id, reason);
                return Err(WorkerError::Failed { worker_id, reason });
            }
            WorkerEvent::Terminated { worker_id } => {
                if !live.remove(&worker_id) {
                    log::warn!("ignoring termination from unknown worker {}", worker_id);
                    continue;
                }
                log::debug!("worker {} done, {} still running", worker_id, live.len());
            }
        }
    }

    Ok(partials)
}
