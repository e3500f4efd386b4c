//! Sorting, self-overlap detection and chain/remainder partitioning over
//! entry views.

use crate::compute::Entry;

/// Stable sort ascending by interval start. Ties keep input order.
pub(crate) fn sort_by_start<G>(entries: &mut [Entry<'_, G>]) {
    entries.sort_by_key(|entry| entry.interval.start);
}

/// Whether a start-sorted sequence contains two overlapping intervals.
///
/// With the entries sorted by start, any overlapping pair implies an
/// adjacent pair where the earlier interval's end exceeds the later one's
/// start, so a single windowed pass suffices.
pub(crate) fn entries_self_overlapping<G>(sorted: &[Entry<'_, G>]) -> bool {
    sorted
        .windows(2)
        .any(|w| w[0].interval.end > w[1].interval.start)
}

/// Greedily split start-sorted entries into a non-self-overlapping chain and
/// a remainder.
///
/// An entry joins the chain iff its start is not before the last chain
/// entry's end; otherwise it goes to the remainder. The chain is a valid
/// sweep input by construction; the remainder may still self-overlap and is
/// resolved by the orchestrator.
pub(crate) fn partition_non_overlapping<'a, G>(
    sorted: Vec<Entry<'a, G>>,
) -> (Vec<Entry<'a, G>>, Vec<Entry<'a, G>>) {
    let mut chain: Vec<Entry<'a, G>> = Vec::with_capacity(sorted.len());
    let mut remainder: Vec<Entry<'a, G>> = Vec::new();

    for entry in sorted {
        match chain.last() {
            Some(prev) if prev.interval.end > entry.interval.start => remainder.push(entry),
            _ => chain.push(entry),
        }
    }

    (chain, remainder)
}
