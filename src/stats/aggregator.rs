//! Aggregate implementations
//!
//! # Example
//!
//! ```
//! use parfold::stats::Aggregate;
//! use parfold::stats::aggregator::{LocalOptimum, MinDistanceAggregate, SumAggregate};
//!
//! let mut sum = SumAggregate::new(1);
//! sum.fold(0, 54);
//! assert_eq!(sum.total(), 55);
//!
//! let mut best = MinDistanceAggregate::new();
//! best.fold(0, Some(LocalOptimum { ordinal: 1, location: "paris".into(), total_km: 10.0 }));
//! best.fold(1, Some(LocalOptimum { ordinal: 0, location: "london".into(), total_km: 10.0 }));
//! assert_eq!(best.best().unwrap().location, "london");
//! ```

use crate::stats::Aggregate;
use serde::{Deserialize, Serialize};

/// Running sum of integer subtotals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumAggregate {
    total: i128,
    folded: usize,
}

impl SumAggregate {
    /// Start the sum at `seed`
    ///
    /// The range-sum job seeds with the lower bound because its sub-ranges
    /// start one above it.
    pub fn new(seed: i64) -> Self {
        Self {
            total: seed as i128,
            folded: 0,
        }
    }

    pub fn total(&self) -> i128 {
        self.total
    }

    /// Number of subtotals folded so far
    pub fn folded(&self) -> usize {
        self.folded
    }
}

impl Aggregate<i128> for SumAggregate {
    fn fold(&mut self, _worker_id: usize, partial: i128) {
        self.total += partial;
        self.folded += 1;
    }
}

/// Best candidate found by one executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalOptimum {
    /// Position of the candidate in the work set (dataset order)
    pub ordinal: usize,
    /// Display name of the candidate
    pub location: String,
    /// Sum of distances from this candidate to every other one, in km
    pub total_km: f64,
}

/// Minimum total distance together with the candidate that achieved it
///
/// Replaces the current best only on strict improvement. On an exact tie the
/// candidate that comes first in the work set is kept, whatever order the
/// executors report in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinDistanceAggregate {
    best: Option<LocalOptimum>,
    folded: usize,
}

impl MinDistanceAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current best candidate, if any executor reported one
    pub fn best(&self) -> Option<&LocalOptimum> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<LocalOptimum> {
        self.best
    }

    pub fn folded(&self) -> usize {
        self.folded
    }

    fn improves_on(candidate: &LocalOptimum, current: &LocalOptimum) -> bool {
        candidate.total_km < current.total_km
            || (candidate.total_km == current.total_km && candidate.ordinal < current.ordinal)
    }
}

impl Aggregate<Option<LocalOptimum>> for MinDistanceAggregate {
    fn fold(&mut self, worker_id: usize, partial: Option<LocalOptimum>) {
        self.folded += 1;

        let Some(candidate) = partial else {
            log::debug!("worker {} reported no candidate", worker_id);
            return;
        };

        let replace = match &self.best {
            None => true,
            Some(current) => Self::improves_on(&candidate, current),
        };

        if replace {
            log::debug!(
                "new best from worker {}: {} ({:.2} km)",
                worker_id,
                candidate.location,
                candidate.total_km
            );
            self.best = Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimum(ordinal: usize, location: &str, total_km: f64) -> Option<LocalOptimum> {
        Some(LocalOptimum {
            ordinal,
            location: location.to_string(),
            total_km,
        })
    }

    #[test]
    fn test_sum_seeded() {
        let agg = SumAggregate::new(7);
        assert_eq!(agg.total(), 7);
        assert_eq!(agg.folded(), 0);
    }

    #[test]
    fn test_sum_order_independent() {
        let partials = [5050i128, 15050, 25050, 35050, -12];

        let mut forward = SumAggregate::new(0);
        for (i, p) in partials.iter().enumerate() {
            forward.fold(i, *p);
        }

        let mut backward = SumAggregate::new(0);
        for (i, p) in partials.iter().enumerate().rev() {
            backward.fold(i, *p);
        }

        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total(), 80188);
        assert_eq!(forward.folded(), 5);
    }

    #[test]
    fn test_min_empty() {
        let agg = MinDistanceAggregate::new();
        assert!(agg.best().is_none());
    }

    #[test]
    fn test_min_strict_improvement() {
        let mut agg = MinDistanceAggregate::new();
        agg.fold(0, optimum(0, "a", 300.0));
        agg.fold(1, optimum(1, "b", 200.0));
        agg.fold(2, optimum(2, "c", 250.0));

        let best = agg.best().unwrap();
        assert_eq!(best.location, "b");
        assert_eq!(best.total_km, 200.0);
        assert_eq!(agg.folded(), 3);
    }

    #[test]
    fn test_min_tie_keeps_first_seen_regardless_of_arrival() {
        let mut agg = MinDistanceAggregate::new();
        agg.fold(1, optimum(1, "paris", 343.56));
        agg.fold(0, optimum(0, "london", 343.56));
        assert_eq!(agg.best().unwrap().location, "london");

        let mut agg = MinDistanceAggregate::new();
        agg.fold(0, optimum(0, "london", 343.56));
        agg.fold(1, optimum(1, "paris", 343.56));
        assert_eq!(agg.best().unwrap().location, "london");
    }

    #[test]
    fn test_min_ignores_empty_partial() {
        let mut agg = MinDistanceAggregate::new();
        agg.fold(0, None);
        agg.fold(1, optimum(4, "x", 1.0));
        agg.fold(2, None);

        assert_eq!(agg.folded(), 3);
        assert_eq!(agg.into_best().unwrap().location, "x");
    }
}
