//! Brute-force matcher: the quadratic fallback and correctness oracle.

use crate::compute::Entry;
use crate::spatial::{SpatialOverlap, footprint_test};
use crate::types::MatchSet;

/// Test every cross pair: interval overlap first, footprint second.
///
/// Needs no ordering on either side. O(|a|·|b|) interval tests plus one
/// geometry test per surviving candidate. Every other strategy must produce
/// the same result as a set.
pub(crate) fn brute_match<G: SpatialOverlap>(a: &[Entry<'_, G>], b: &[Entry<'_, G>]) -> MatchSet {
    let mut out = MatchSet::new();
    for left in a {
        for right in b {
            if left.interval.overlaps(&right.interval)
                && footprint_test(left.footprint, right.footprint)
            {
                out.push(left.idx, right.idx);
            }
        }
    }
    out
}
