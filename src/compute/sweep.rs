//! Two-cursor merge-join sweep over start-sorted entries.

use crate::compute::Entry;
use crate::spatial::{SpatialOverlap, footprint_test};
use crate::types::MatchSet;

/// Merge-join two start-sorted entry sequences.
///
/// Linear when both sides are non-self-overlapping chains. The advance rule
/// (move the cursor whose interval ends no later; ties advance `a`) is only
/// sound on chains: past the moved cursor, nothing on the other side can
/// still overlap the abandoned entry under the sorted-start invariant. The
/// orchestrator therefore never feeds this routine a self-overlapping side.
pub(crate) fn sweep_match<G: SpatialOverlap>(a: &[Entry<'_, G>], b: &[Entry<'_, G>]) -> MatchSet {
    let mut out = MatchSet::new();
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        let left = &a[i];
        let right = &b[j];

        if right.interval.end <= left.interval.start {
            // b's entry ends before a's begins
            j += 1;
        } else if left.interval.end <= right.interval.start {
            i += 1;
        } else {
            if footprint_test(left.footprint, right.footprint) {
                out.push(left.idx, right.idx);
            }
            if left.interval.end <= right.interval.end {
                i += 1;
            } else {
                j += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::brute::brute_match;
    use crate::compute::partition::sort_by_start;
    use crate::types::{Collection, Record, TimeInterval};

    fn chain(intervals: &[(u64, u64)]) -> Collection {
        Collection::from_records(
            intervals
                .iter()
                .enumerate()
                .map(|(i, &(start, end))| {
                    Record::new(i as i64, TimeInterval::from_unix_seconds(start, end))
                })
                .collect(),
        )
    }

    fn sweep(a: &Collection, b: &Collection) -> MatchSet {
        let mut ea = Entry::from_collection(a);
        let mut eb = Entry::from_collection(b);
        sort_by_start(&mut ea);
        sort_by_start(&mut eb);
        sweep_match(&ea, &eb)
    }

    #[test]
    fn test_basic_interval_join() {
        let a = chain(&[(0, 10), (20, 30), (40, 50)]);
        let b = chain(&[(5, 15), (25, 26), (60, 70)]);

        let matches = sweep(&a, &b);
        assert_eq!(matches.sorted_pairs(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_one_record_matching_many() {
        // A single long a-record spanning three b-records
        let a = chain(&[(0, 100)]);
        let b = chain(&[(10, 20), (30, 40), (50, 60)]);

        let matches = sweep(&a, &b);
        assert_eq!(matches.sorted_pairs(), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_touching_endpoints_do_not_match() {
        let a = chain(&[(0, 5)]);
        let b = chain(&[(5, 10)]);
        assert!(sweep(&a, &b).is_empty());
    }

    #[test]
    fn test_agrees_with_brute_force_on_chains() {
        let a = chain(&[(0, 8), (10, 18), (20, 28), (30, 38), (40, 48)]);
        let b = chain(&[(5, 9), (9, 12), (15, 25), (37, 45), (50, 60)]);

        let swept = sweep(&a, &b);
        let oracle = brute_match(&Entry::from_collection(&a), &Entry::from_collection(&b));
        assert_eq!(swept.sorted_pairs(), oracle.sorted_pairs());
    }

    #[test]
    fn test_exhausting_either_side_terminates() {
        let a = chain(&[(0, 1)]);
        let b = chain(&[(100, 200), (300, 400)]);
        assert!(sweep(&a, &b).is_empty());

        let empty = chain(&[]);
        assert!(sweep(&empty, &b).is_empty());
        assert!(sweep(&a, &empty).is_empty());
    }
}
