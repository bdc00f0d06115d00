//! parfold - partition, dispatch, reduce
//!
//! parfold splits a small, bounded work set across a fixed pool of worker
//! threads and folds their partial results in the coordinating thread.
//!
//! # Architecture
//!
//! - **Partitioning**: round-robin buckets, fixed-size range chunks
//! - **Worker pool**: one OS thread per non-empty bucket, typed event channel
//! - **Coordinator**: single-threaded receive loop owning the aggregate
//! - **Aggregates**: seeded sum, min with first-seen argmin
//! - **Jobs**: integer range sum, optimal meeting point over a city dataset

pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod job;
pub mod metric;
pub mod output;
pub mod partition;
pub mod stats;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::Coordinator;
pub use worker::{Job, WorkerPool};

/// Result type used throughout parfold
pub type Result<T> = anyhow::Result<T>;
