//! Integer range sums

use crate::partition::SubRange;

/// Sum every integer in the sub-range by direct accumulation
///
/// This is the unit of work handed to executors, so it deliberately walks the
/// range instead of using the closed form.
pub fn sum_range(range: SubRange) -> i128 {
    let mut sum: i128 = 0;
    for i in range.lo..=range.hi {
        sum += i as i128;
    }
    sum
}

/// Closed-form sum of `[lo, hi]`: `(hi - lo + 1)(hi + lo) / 2`
///
/// Computed once by the coordinator to cross-check the distributed result.
pub fn closed_form_sum(lo: i64, hi: i64) -> i128 {
    let (lo, hi) = (lo as i128, hi as i128);
    (hi - lo + 1) * (hi + lo) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_range_basic() {
        assert_eq!(sum_range(SubRange { lo: 1, hi: 10 }), 55);
        assert_eq!(sum_range(SubRange { lo: 2, hi: 10 }), 54);
        assert_eq!(sum_range(SubRange { lo: 7, hi: 7 }), 7);
    }

    #[test]
    fn test_sum_range_negative() {
        assert_eq!(sum_range(SubRange { lo: -10, hi: 10 }), 0);
        assert_eq!(sum_range(SubRange { lo: -5, hi: -1 }), -15);
    }

    #[test]
    fn test_sum_range_empty() {
        assert_eq!(sum_range(SubRange { lo: 5, hi: 4 }), 0);
    }

    #[test]
    fn test_closed_form_matches_accumulation() {
        for (lo, hi) in [(1i64, 10i64), (0, 1), (-100, 37), (250, 1999), (-7, -3)] {
            assert_eq!(closed_form_sum(lo, hi), sum_range(SubRange { lo, hi }));
        }
    }

    #[test]
    fn test_closed_form_large_bounds() {
        // Would overflow in i64 arithmetic
        let hi = i64::MAX;
        let lo = i64::MAX - 1;
        assert_eq!(closed_form_sum(lo, hi), lo as i128 + hi as i128);
    }
}
