//! Overlap-resolving orchestration: the public entry points for
//! spatiotemporal colocation.

use crate::compute::Entry;
use crate::compute::brute::brute_match;
use crate::compute::partition::{entries_self_overlapping, partition_non_overlapping, sort_by_start};
use crate::compute::sweep::sweep_match;
use crate::compute::validation::validate_collection;
use crate::error::{ColocError, Result};
use crate::spatial::SpatialOverlap;
use crate::types::{Collection, ColocOptions, MatchSet};

/// Colocate two collections with default options.
///
/// Returns every pair of records (one per collection) whose intervals
/// overlap and whose footprints touch. Pairs reference positions in the
/// caller-supplied ordering of each input. Inputs may be unsorted and may
/// contain internally overlapping intervals; neither is ever mutated.
///
/// # Examples
///
/// ```rust
/// use coloc::{Collection, Record, TimeInterval, colocate};
/// use geo::polygon;
///
/// let swath = polygon![
///     (x: -5.0, y: 40.0),
///     (x: 5.0, y: 40.0),
///     (x: 5.0, y: 50.0),
///     (x: -5.0, y: 50.0),
///     (x: -5.0, y: 40.0),
/// ];
///
/// let mut products: Collection = Collection::new();
/// products.push(Record::with_footprint(
///     1,
///     TimeInterval::from_unix_seconds(0, 10),
///     swath.clone(),
/// ));
///
/// let mut scenes: Collection = Collection::new();
/// scenes.push(Record::with_footprint(
///     "a",
///     TimeInterval::from_unix_seconds(5, 15),
///     swath.clone(),
/// ));
/// scenes.push(Record::with_footprint(
///     "b",
///     TimeInterval::from_unix_seconds(20, 30),
///     swath,
/// ));
///
/// let matches = colocate(&products, &scenes)?;
/// assert_eq!(matches.pairs(), &[(0, 0)]);
/// # Ok::<(), coloc::ColocError>(())
/// ```
pub fn colocate<G: SpatialOverlap>(a: &Collection<G>, b: &Collection<G>) -> Result<MatchSet> {
    colocate_with(a, b, &ColocOptions::default())
}

/// Colocate two collections with explicit options.
///
/// Options and both collections are validated eagerly; malformed intervals
/// (`start > end`) abort the call before any matching begins. The only other
/// error is the fatal [`ColocError::OverlapNotReduced`] fault, raised if an
/// overlap-removal pass fails to make progress on corrupted data.
pub fn colocate_with<G: SpatialOverlap>(
    a: &Collection<G>,
    b: &Collection<G>,
    options: &ColocOptions,
) -> Result<MatchSet> {
    options.validate()?;
    validate_collection(a)?;
    validate_collection(b)?;

    colocate_entries(
        Entry::from_collection(a),
        Entry::from_collection(b),
        options,
        0,
    )
}

/// Brute-force colocation: test every cross pair.
///
/// The ground-truth reference for [`colocate`]; both produce the same result
/// as a set for any input. Use this directly for tiny collections or as a
/// correctness oracle in tests. O(|a|·|b|).
pub fn match_all<G: SpatialOverlap>(a: &Collection<G>, b: &Collection<G>) -> Result<MatchSet> {
    validate_collection(a)?;
    validate_collection(b)?;
    Ok(brute_match(
        &Entry::from_collection(a),
        &Entry::from_collection(b),
    ))
}

/// One overlap-resolution pass over sorted entry views.
///
/// Self-overlapping sides are split into a chain and a remainder. Small
/// remainders (below the fallback threshold) are resolved by recursing with
/// operands swapped, so the side most likely still self-overlapping is
/// examined first on the next pass; large remainders go straight to the
/// brute-force matcher to bound worst-case cost. The final chains are merge-
/// joined by the sweep. Each partition strictly shrinks the overlapping
/// side, so the descent is bounded.
fn colocate_entries<'a, G: SpatialOverlap>(
    mut a: Vec<Entry<'a, G>>,
    mut b: Vec<Entry<'a, G>>,
    options: &ColocOptions,
    depth: usize,
) -> Result<MatchSet> {
    if a.is_empty() || b.is_empty() {
        return Ok(MatchSet::new());
    }

    sort_by_start(&mut a);
    sort_by_start(&mut b);

    log::debug!(
        "colocate pass: |a| = {}, |b| = {}, depth = {}",
        a.len(),
        b.len(),
        depth
    );

    let mut out = MatchSet::new();

    if entries_self_overlapping(&a) {
        let total = a.len();
        let (chain, remainder) = partition_non_overlapping(a);
        if entries_self_overlapping(&chain) {
            return Err(ColocError::OverlapNotReduced {
                remaining: chain.len(),
            });
        }

        let ratio = remainder.len() as f64 / total as f64;
        if ratio < options.overlap_fallback_threshold {
            log::debug!(
                "a self-overlapping: {:.0}% of {}, recursing against b ({})",
                ratio * 100.0,
                total,
                b.len()
            );
            out.merge(colocate_entries(b.clone(), remainder, options, depth + 1)?.flipped());
        } else {
            log::debug!(
                "a self-overlapping: {:.0}% of {}, brute-force against b ({})",
                ratio * 100.0,
                total,
                b.len()
            );
            out.merge(brute_match(&remainder, &b));
        }
        a = chain;
    }

    if entries_self_overlapping(&b) {
        let total = b.len();
        let (chain, remainder) = partition_non_overlapping(b);
        if entries_self_overlapping(&chain) {
            return Err(ColocError::OverlapNotReduced {
                remaining: chain.len(),
            });
        }

        let ratio = remainder.len() as f64 / total as f64;
        if ratio < options.overlap_fallback_threshold {
            log::debug!(
                "b self-overlapping: {:.0}% of {}, recursing against a ({})",
                ratio * 100.0,
                total,
                a.len()
            );
            out.merge(colocate_entries(remainder, a.clone(), options, depth + 1)?.flipped());
        } else {
            log::debug!(
                "b self-overlapping: {:.0}% of {}, brute-force against a ({})",
                ratio * 100.0,
                total,
                a.len()
            );
            out.merge(brute_match(&a, &remainder));
        }
        b = chain;
    }

    out.merge(sweep_match(&a, &b));
    Ok(out)
}
