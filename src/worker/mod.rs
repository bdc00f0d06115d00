//! Worker pool implementation
//!
//! This module implements the executor side of a run. A [`Job`] binds together
//! the item type, the read-only context and the partial result an executor
//! produces; the [`WorkerPool`] spawns one OS thread per bucket and reports back
//! over a single typed channel.
//!
//! # Protocol
//!
//! Every executor sends exactly two events, in this order:
//!
//! 1. [`WorkerEvent::Partial`] with its local result, or [`WorkerEvent::Failed`]
//!    if the job returned an error or panicked
//! 2. [`WorkerEvent::Terminated`]
//!
//! Executors never talk to each other and never mutate the context. The
//! coordinator is the only consumer of the channel.
//!
//! # Example
//!
//! ```
//! use parfold::worker::{Job, WorkerEvent, WorkerPool};
//! use std::sync::Arc;
//!
//! struct Doubler;
//!
//! impl Job for Doubler {
//!     type Item = u32;
//!     type Context = ();
//!     type Partial = u32;
//!
//!     fn execute(_worker_id: usize, bucket: &[u32], _ctx: &()) -> anyhow::Result<u32> {
//!         Ok(bucket.iter().map(|x| x * 2).sum())
//!     }
//! }
//!
//! let pool = WorkerPool::<Doubler>::spawn(vec![vec![1, 2], vec![3]], Arc::new(()))?;
//! assert_eq!(pool.size(), 2);
//!
//! let mut total = 0;
//! let mut live = pool.size();
//! while live > 0 {
//!     match pool.events().recv()? {
//!         WorkerEvent::Partial { partial, .. } => total += partial,
//!         WorkerEvent::Terminated { .. } => live -= 1,
//!         WorkerEvent::Failed { reason, .. } => panic!("{}", reason),
//!     }
//! }
//! pool.join()?;
//! assert_eq!(total, 12);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crossbeam::channel::{self, Receiver, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// A unit of distributable work
///
/// Implementors are type-level descriptions: the executor function receives
/// everything it needs through its bucket and the shared context.
///
/// # Thread Safety
///
/// Items are moved into exactly one executor. The context is shared behind an
/// `Arc` and only ever read.
pub trait Job: 'static {
    /// Identity of one work item (a sub-range, a location, ...)
    type Item: Send + 'static;

    /// Read-only data shared by all executors
    type Context: Send + Sync + 'static;

    /// Local result reported once per executor
    type Partial: Send + 'static;

    /// Compute the partial result for one bucket
    fn execute(
        worker_id: usize,
        bucket: &[Self::Item],
        ctx: &Self::Context,
    ) -> anyhow::Result<Self::Partial>;
}

/// Event sent from an executor to the coordinator
#[derive(Debug)]
pub enum WorkerEvent<P> {
    /// Local result of one executor
    Partial { worker_id: usize, partial: P },
    /// The job returned an error or panicked
    Failed { worker_id: usize, reason: String },
    /// The executor is done; always the last event it sends
    Terminated { worker_id: usize },
}

/// Failures of the concurrent phase
///
/// Any of these aborts the whole computation.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn worker {worker_id}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker_id} failed: {reason}")]
    Failed { worker_id: usize, reason: String },

    #[error("event channel closed with {live} worker(s) still running")]
    Vanished { live: usize },

    #[error("worker thread {worker_id} panicked outside its job")]
    Panicked { worker_id: usize },
}

/// Fixed-size pool of executor threads, one per bucket
///
/// The pool is sized by the number of buckets it was spawned with; there is no
/// work-stealing and no executor ever spawns another.
pub struct WorkerPool<J: Job> {
    handles: Vec<(usize, JoinHandle<()>)>,
    events: Receiver<WorkerEvent<J::Partial>>,
}

impl<J: Job> WorkerPool<J> {
    /// Spawn one executor per bucket
    ///
    /// Worker IDs follow bucket order starting at 0. Empty buckets are still
    /// spawned if passed in; use [`crate::partition::round_robin`] to avoid them.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Spawn`] if the OS refuses a thread. Executors that
    /// were already started run to completion and their events are discarded.
    pub fn spawn(
        buckets: Vec<Vec<J::Item>>,
        context: Arc<J::Context>,
    ) -> Result<Self, WorkerError> {
        let (tx, rx) = channel::unbounded();
        let mut handles = Vec::with_capacity(buckets.len());

        for (worker_id, bucket) in buckets.into_iter().enumerate() {
            let tx = tx.clone();
            let context = Arc::clone(&context);

            let handle = thread::Builder::new()
                .name(format!("parfold-worker-{}", worker_id))
                .spawn(move || run_executor::<J>(worker_id, bucket, context, tx))
                .map_err(|source| WorkerError::Spawn { worker_id, source })?;

            handles.push((worker_id, handle));
        }

        Ok(Self { handles, events: rx })
    }

    /// Number of executors spawned
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// IDs of the spawned executors
    pub fn worker_ids(&self) -> Vec<usize> {
        self.handles.iter().map(|(id, _)| *id).collect()
    }

    /// Receiving end of the event channel
    ///
    /// The channel disconnects once every executor has dropped its sender.
    pub fn events(&self) -> &Receiver<WorkerEvent<J::Partial>> {
        &self.events
    }

    /// Wait for every executor thread to exit
    pub fn join(self) -> Result<(), WorkerError> {
        for (worker_id, handle) in self.handles {
            handle
                .join()
                .map_err(|_| WorkerError::Panicked { worker_id })?;
        }
        Ok(())
    }
}

/// Body of one executor thread
fn run_executor<J: Job>(
    worker_id: usize,
    bucket: Vec<J::Item>,
    context: Arc<J::Context>,
    tx: Sender<WorkerEvent<J::Partial>>,
) {
    log::debug!("worker {} started with {} item(s)", worker_id, bucket.len());

    let outcome =
        panic::catch_unwind(AssertUnwindSafe(|| J::execute(worker_id, &bucket, &context)));

    let event = match outcome {
        Ok(Ok(partial)) => WorkerEvent::Partial { worker_id, partial },
        Ok(Err(e)) => WorkerEvent::Failed {
            worker_id,
            reason: format!("{:#}", e),
        },
        Err(payload) => WorkerEvent::Failed {
            worker_id,
            reason: format!("panicked: {}", panic_message(payload.as_ref())),
        },
    };

    // Sends only fail when the coordinator has already given up on the run
    let _ = tx.send(event);
    let _ = tx.send(WorkerEvent::Terminated { worker_id });

    log::debug!("worker {} terminated", worker_id);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct SumJob;

    impl Job for SumJob {
        type Item = u64;
        type Context = u64;
        type Partial = u64;

        fn execute(_worker_id: usize, bucket: &[u64], offset: &u64) -> anyhow::Result<u64> {
            Ok(bucket.iter().map(|x| x + offset).sum())
        }
    }

    struct FailingJob;

    impl Job for FailingJob {
        type Item = u32;
        type Context = ();
        type Partial = u32;

        fn execute(worker_id: usize, bucket: &[u32], _ctx: &()) -> anyhow::Result<u32> {
            if worker_id == 1 {
                anyhow::bail!("bad bucket {:?}", bucket);
            }
            Ok(bucket.len() as u32)
        }
    }

    struct PanickingJob;

    impl Job for PanickingJob {
        type Item = u32;
        type Context = ();
        type Partial = u32;

        fn execute(_worker_id: usize, _bucket: &[u32], _ctx: &()) -> anyhow::Result<u32> {
            panic!("boom");
        }
    }

    fn drain<P>(pool_events: &Receiver<WorkerEvent<P>>, live: usize) -> Vec<WorkerEvent<P>> {
        let mut events = Vec::new();
        let mut remaining = live;
        while remaining > 0 {
            let event = pool_events.recv().unwrap();
            if matches!(event, WorkerEvent::Terminated { .. }) {
                remaining -= 1;
            }
            events.push(event);
        }
        events
    }

    #[test]
    fn test_spawn_one_executor_per_bucket() {
        let pool =
            WorkerPool::<SumJob>::spawn(vec![vec![1, 2], vec![3], vec![4, 5, 6]], Arc::new(10))
                .unwrap();
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.worker_ids(), vec![0, 1, 2]);

        let events = drain(pool.events(), pool.size());
        pool.join().unwrap();

        let partials: HashMap<usize, u64> = events
            .iter()
            .filter_map(|e| match e {
                WorkerEvent::Partial { worker_id, partial } => Some((*worker_id, *partial)),
                _ => None,
            })
            .collect();

        assert_eq!(partials.len(), 3);
        assert_eq!(partials[&0], 23);
        assert_eq!(partials[&1], 13);
        assert_eq!(partials[&2], 45);
    }

    #[test]
    fn test_partial_precedes_termination() {
        let pool = WorkerPool::<SumJob>::spawn(vec![vec![1]; 4], Arc::new(0)).unwrap();
        let events = drain(pool.events(), pool.size());
        pool.join().unwrap();

        for worker_id in 0..4 {
            let partial_pos = events
                .iter()
                .position(|e| {
                    matches!(e, WorkerEvent::Partial { worker_id: id, .. } if *id == worker_id)
                })
                .unwrap();
            let term_pos = events
                .iter()
                .position(|e| {
                    matches!(e, WorkerEvent::Terminated { worker_id: id } if *id == worker_id)
                })
                .unwrap();
            assert!(partial_pos < term_pos);
        }
        assert_eq!(events.len(), 8);
    }

    #[test]
    fn test_channel_disconnects_after_all_terminate() {
        let pool = WorkerPool::<SumJob>::spawn(vec![vec![1], vec![2]], Arc::new(0)).unwrap();
        let _ = drain(pool.events(), pool.size());
        assert!(pool.events().recv().is_err());
        pool.join().unwrap();
    }

    #[test]
    fn test_job_error_reported_as_failed() {
        let pool =
            WorkerPool::<FailingJob>::spawn(vec![vec![1], vec![2], vec![3]], Arc::new(()))
                .unwrap();
        let events = drain(pool.events(), pool.size());
        pool.join().unwrap();

        let failures: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                WorkerEvent::Failed { worker_id, reason } => Some((*worker_id, reason.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, 1);
        assert!(failures[0].1.contains("bad bucket"));
    }

    #[test]
    fn test_panic_reported_as_failed_and_still_terminates() {
        let pool = WorkerPool::<PanickingJob>::spawn(vec![vec![1], vec![2]], Arc::new(())).unwrap();
        let events = drain(pool.events(), pool.size());
        pool.join().unwrap();

        let failed = events
            .iter()
            .filter(|e| matches!(e, WorkerEvent::Failed { reason, .. } if reason.contains("boom")))
            .count();
        assert_eq!(failed, 2);
    }

    #[test]
    fn test_spawn_no_buckets() {
        let pool = WorkerPool::<SumJob>::spawn(Vec::new(), Arc::new(0)).unwrap();
        assert_eq!(pool.size(), 0);
        assert!(pool.events().recv().is_err());
        pool.join().unwrap();
    }

    #[test]
    fn test_panic_message_payloads() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }
}
