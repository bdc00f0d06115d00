//! Work partitioning
//!
//! Splits a known-up-front work set into per-executor buckets before dispatch.
//!
//! # Strategies
//!
//! - **Round-robin**: item `i` goes to bucket `i mod K`. Empty buckets are
//!   dropped so no executor is ever spawned without work.
//! - **Range chunking**: a numeric interval is cut into fixed-size sub-ranges
//!   which then become the items handed to [`round_robin`].
//!
//! Distribution is even under the assumption of uniform per-item cost; no
//! attempt is made at cost-aware balancing.
//!
//! # Example
//!
//! ```
//! use parfold::partition::round_robin;
//!
//! let buckets = round_robin(vec!['a', 'b', 'c', 'd', 'e', 'f', 'g'], 5);
//! assert_eq!(buckets, vec![vec!['a', 'f'], vec!['b', 'g'], vec!['c'], vec!['d'], vec!['e']]);
//! ```

use serde::{Deserialize, Serialize};

/// An inclusive integer sub-range `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRange {
    pub lo: i64,
    pub hi: i64,
}

impl SubRange {
    /// Number of integers in the sub-range (0 if `hi < lo`)
    pub fn len(&self) -> u64 {
        if self.hi < self.lo {
            0
        } else {
            (self.hi as i128 - self.lo as i128 + 1) as u64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distribute items across at most `pool_size` buckets in round-robin order
///
/// Bucket order follows the bucket index and each bucket keeps its items in
/// input order. Buckets that receive nothing are omitted, so the result has
/// `min(items.len(), pool_size)` entries. A `pool_size` of zero is treated as
/// one; validation rejects it long before this point.
pub fn round_robin<T>(items: Vec<T>, pool_size: usize) -> Vec<Vec<T>> {
    let pool_size = pool_size.max(1);
    let mut buckets: Vec<Vec<T>> = (0..pool_size).map(|_| Vec::new()).collect();

    for (i, item) in items.into_iter().enumerate() {
        buckets[i % pool_size].push(item);
    }

    buckets.retain(|bucket| !bucket.is_empty());
    buckets
}

/// Cut the interval above `min` into sub-ranges of at most `chunk_size` integers
///
/// A cursor starts at `min` and advances by `chunk_size` while it is below
/// `max`. Each step yields `[cursor + 1, min(max, cursor + chunk_size)]`, so the
/// sub-ranges cover `(min, max]` exactly once. `min` itself is deliberately left
/// out: the sum aggregate is seeded with it.
///
/// Returns an empty vector when `min >= max`.
///
/// # Example
///
/// ```
/// use parfold::partition::{chunk_range, SubRange};
///
/// let chunks = chunk_range(0, 250, 100);
/// assert_eq!(chunks, vec![
///     SubRange { lo: 1, hi: 100 },
///     SubRange { lo: 101, hi: 200 },
///     SubRange { lo: 201, hi: 250 },
/// ]);
/// ```
pub fn chunk_range(min: i64, max: i64, chunk_size: u64) -> Vec<SubRange> {
    let chunk_size = chunk_size.max(1) as i128;
    let (min, max) = (min as i128, max as i128);

    let mut chunks = Vec::new();
    let mut cursor = min;
    while cursor < max {
        let hi = max.min(cursor + chunk_size);
        chunks.push(SubRange {
            lo: (cursor + 1) as i64,
            hi: hi as i64,
        });
        cursor += chunk_size;
    }

    chunks
}
