//! Core data model: time intervals, record identities, collections, options
//! and match results.

use crate::error::{ColocError, Result};
use geo::Polygon;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A half-open time interval `[start, end)`.
///
/// Touching endpoints do not overlap, and two coinciding instants
/// (`start == end`) never overlap each other.
///
/// # Examples
///
/// ```rust
/// use coloc::TimeInterval;
///
/// let a = TimeInterval::from_unix_seconds(0, 5);
/// let b = TimeInterval::from_unix_seconds(5, 10);
/// let c = TimeInterval::from_unix_seconds(4, 10);
///
/// assert!(!a.overlaps(&b)); // touching endpoints
/// assert!(a.overlaps(&c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: SystemTime,
    pub end: SystemTime,
}

impl TimeInterval {
    /// Create an interval from explicit timestamps.
    ///
    /// No validation happens here; `start > end` is rejected eagerly by
    /// [`colocate`](crate::colocate) before any matching begins.
    pub fn new(start: SystemTime, end: SystemTime) -> Self {
        Self { start, end }
    }

    /// Create an interval from seconds since the Unix epoch.
    pub fn from_unix_seconds(start: u64, end: u64) -> Self {
        Self {
            start: UNIX_EPOCH + Duration::from_secs(start),
            end: UNIX_EPOCH + Duration::from_secs(end),
        }
    }

    /// Half-open overlap test: `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the interval is a degenerate instant (`start == end`).
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Whether `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Length of the interval, or `None` when it is not well formed.
    pub fn duration(&self) -> Option<Duration> {
        self.end.duration_since(self.start).ok()
    }
}

/// A scalar identity component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdPart {
    Int(i64),
    Text(String),
}

impl From<i64> for IdPart {
    fn from(value: i64) -> Self {
        IdPart::Int(value)
    }
}

impl From<i32> for IdPart {
    fn from(value: i32) -> Self {
        IdPart::Int(value as i64)
    }
}

impl From<&str> for IdPart {
    fn from(value: &str) -> Self {
        IdPart::Text(value.to_string())
    }
}

impl From<String> for IdPart {
    fn from(value: String) -> Self {
        IdPart::Text(value)
    }
}

/// Record identity: a scalar or a composite tuple of scalars.
///
/// Identities are opaque to the matching algorithms and need not be unique
/// within a collection; duplicates are independently matchable. Composite
/// identities mirror catalog keys made of several parts (e.g. mission and
/// acquisition id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    Scalar(IdPart),
    Composite(SmallVec<[IdPart; 2]>),
}

impl RecordId {
    /// Build a composite identity from any sequence of scalar parts.
    ///
    /// ```rust
    /// use coloc::RecordId;
    ///
    /// let key = RecordId::composite(["S1A", "IW_GRDH"]);
    /// assert_ne!(key, RecordId::from("S1A"));
    /// ```
    pub fn composite<P>(parts: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<IdPart>,
    {
        RecordId::Composite(parts.into_iter().map(Into::into).collect())
    }
}

impl From<IdPart> for RecordId {
    fn from(part: IdPart) -> Self {
        RecordId::Scalar(part)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Scalar(value.into())
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Scalar(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Scalar(value.into())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Scalar(value.into())
    }
}

/// A single catalog record: identity, acquisition interval and optional
/// spatial footprint.
///
/// A record without a footprint matches on time alone; the spatial predicate
/// is vacuously true for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<G = Polygon> {
    pub id: RecordId,
    pub interval: TimeInterval,
    pub footprint: Option<G>,
}

impl<G> Record<G> {
    /// Create a record without a footprint (time-only matching).
    pub fn new(id: impl Into<RecordId>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            interval,
            footprint: None,
        }
    }

    /// Create a record with a spatial footprint.
    pub fn with_footprint(id: impl Into<RecordId>, interval: TimeInterval, footprint: G) -> Self {
        Self {
            id: id.into(),
            interval,
            footprint: Some(footprint),
        }
    }
}

impl<G: crate::spatial::SpatialOverlap> Record<G> {
    /// Whether two records colocate: intervals overlap and footprints touch.
    pub fn colocates_with(&self, other: &Record<G>) -> bool {
        self.interval.overlaps(&other.interval)
            && crate::spatial::footprint_test(self.footprint.as_ref(), other.footprint.as_ref())
    }
}

/// An ordered sequence of records.
///
/// Collections are read-only inputs to a colocation call; any sorting or
/// partitioning the algorithms need happens on private views, never on the
/// caller's data.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<G = Polygon> {
    records: Vec<Record<G>>,
}

impl<G> Default for Collection<G> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<G> Collection<G> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from existing records, preserving their order.
    pub fn from_records(records: Vec<Record<G>>) -> Self {
        Self { records }
    }

    /// Append a record.
    pub fn push(&mut self, record: Record<G>) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record<G>] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record<G>> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<G>> {
        self.records.iter()
    }

    /// Whether any two records of this collection have overlapping intervals.
    ///
    /// Checked on a sorted private copy of the intervals: after a stable sort
    /// by start, the collection self-overlaps iff some interval's end exceeds
    /// the next interval's start. Empty and single-record collections never
    /// self-overlap.
    pub fn is_self_overlapping(&self) -> bool {
        let mut intervals: Vec<TimeInterval> = self.records.iter().map(|r| r.interval).collect();
        intervals.sort_by_key(|interval| interval.start);
        intervals.windows(2).any(|w| w[0].end > w[1].start)
    }
}

impl<G: Clone> Collection<G> {
    /// Return a copy ordered ascending by interval start.
    ///
    /// The sort is stable, so ties keep their input order and results stay
    /// deterministic.
    pub fn sorted_by_start(&self) -> Collection<G> {
        let mut records = self.records.clone();
        records.sort_by_key(|record| record.interval.start);
        Collection { records }
    }

    /// Split into a non-self-overlapping chain and a remainder.
    ///
    /// Walks the records in start order; a record joins the chain iff its
    /// interval does not overlap the last chain element, otherwise it goes to
    /// the remainder. The chain is non-self-overlapping by construction; the
    /// remainder may still contain internal overlaps.
    pub fn partition_non_overlapping(&self) -> (Collection<G>, Collection<G>) {
        let sorted = self.sorted_by_start();
        let mut chain: Vec<Record<G>> = Vec::with_capacity(sorted.records.len());
        let mut remainder: Vec<Record<G>> = Vec::new();

        for record in sorted.records {
            match chain.last() {
                Some(prev) if prev.interval.end > record.interval.start => remainder.push(record),
                _ => chain.push(record),
            }
        }

        (
            Collection { records: chain },
            Collection { records: remainder },
        )
    }
}

impl<G> From<Vec<Record<G>>> for Collection<G> {
    fn from(records: Vec<Record<G>>) -> Self {
        Self::from_records(records)
    }
}

impl<'a, G> IntoIterator for &'a Collection<G> {
    type Item = &'a Record<G>;
    type IntoIter = std::slice::Iter<'a, Record<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Options controlling a colocation call.
///
/// # Example
///
/// ```rust
/// use coloc::ColocOptions;
///
/// let options = ColocOptions::default().with_overlap_fallback_threshold(0.25);
/// assert!(options.validate().is_ok());
///
/// // Load from JSON
/// let options = ColocOptions::from_json(r#"{ "overlap_fallback_threshold": 0.05 }"#).unwrap();
/// assert_eq!(options.overlap_fallback_threshold, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColocOptions {
    /// Fraction of self-overlapping records above which the orchestrator
    /// drops to the brute-force matcher instead of recursing. An empirical
    /// tuning constant; not guaranteed optimal for every data distribution.
    #[serde(default = "ColocOptions::default_overlap_fallback_threshold")]
    pub overlap_fallback_threshold: f64,
}

impl ColocOptions {
    pub const DEFAULT_OVERLAP_FALLBACK_THRESHOLD: f64 = 0.10;

    const fn default_overlap_fallback_threshold() -> f64 {
        Self::DEFAULT_OVERLAP_FALLBACK_THRESHOLD
    }

    pub fn with_overlap_fallback_threshold(mut self, threshold: f64) -> Self {
        self.overlap_fallback_threshold = threshold;
        self
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.overlap_fallback_threshold;
        if !threshold.is_finite() {
            return Err(ColocError::InvalidInput(format!(
                "overlap fallback threshold must be finite, got: {}",
                threshold
            )));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ColocError::InvalidInput(format!(
                "overlap fallback threshold out of range [0.0, 1.0]: {}",
                threshold
            )));
        }
        Ok(())
    }

    /// Load options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ColocOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Save options as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ColocOptions {
    fn default() -> Self {
        Self {
            overlap_fallback_threshold: Self::DEFAULT_OVERLAP_FALLBACK_THRESHOLD,
        }
    }
}

/// The multiset of matched index pairs produced by a colocation call.
///
/// Each pair `(left, right)` references positions in the caller-supplied
/// ordering of the two input collections. A record may appear in several
/// pairs when it overlaps several counterparts. The contract is set-equality
/// with the brute-force matcher; no particular pair order is promised beyond
/// determinism for a given input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    pairs: Vec<(usize, usize)>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, left: usize, right: usize) {
        self.pairs.push((left, right));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }

    /// Append all pairs of `other`.
    pub fn merge(&mut self, other: MatchSet) {
        self.pairs.extend(other.pairs);
    }

    /// Swap the orientation of every pair, turning `(left, right)` into
    /// `(right, left)`.
    pub fn flipped(mut self) -> MatchSet {
        for pair in &mut self.pairs {
            *pair = (pair.1, pair.0);
        }
        self
    }

    /// Pairs in sorted order, for set comparisons.
    pub fn sorted_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = self.pairs.clone();
        pairs.sort_unstable();
        pairs
    }
}

impl IntoIterator for MatchSet {
    type Item = (usize, usize);
    type IntoIter = std::vec::IntoIter<(usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl FromIterator<(usize, usize)> for MatchSet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: u64, end: u64) -> TimeInterval {
        TimeInterval::from_unix_seconds(start, end)
    }

    #[test]
    fn test_overlap_semantics() {
        assert!(interval(0, 10).overlaps(&interval(5, 15)));
        assert!(interval(5, 15).overlaps(&interval(0, 10)));
        assert!(interval(0, 10).overlaps(&interval(2, 8)));

        // Touching endpoints do not overlap
        assert!(!interval(0, 5).overlaps(&interval(5, 10)));
        assert!(!interval(5, 10).overlaps(&interval(0, 5)));

        // Disjoint
        assert!(!interval(0, 5).overlaps(&interval(7, 10)));
    }

    #[test]
    fn test_instants_never_overlap_each_other() {
        let a = interval(5, 5);
        let b = interval(5, 5);
        assert!(a.is_instant());
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&a));
    }

    #[test]
    fn test_interval_duration() {
        assert_eq!(
            interval(10, 40).duration(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(interval(5, 5).duration(), Some(Duration::ZERO));

        let backwards = TimeInterval::new(
            UNIX_EPOCH + Duration::from_secs(10),
            UNIX_EPOCH + Duration::from_secs(5),
        );
        assert!(!backwards.is_well_formed());
        assert_eq!(backwards.duration(), None);
    }

    #[test]
    fn test_record_ids() {
        assert_eq!(RecordId::from(7), RecordId::Scalar(IdPart::Int(7)));
        assert_eq!(
            RecordId::from("S1A"),
            RecordId::Scalar(IdPart::Text("S1A".to_string()))
        );

        let composite = RecordId::composite(["S1A", "IW"]);
        match &composite {
            RecordId::Composite(parts) => assert_eq!(parts.len(), 2),
            _ => panic!("expected composite id"),
        }
        assert_ne!(composite, RecordId::from("S1A"));
    }

    #[test]
    fn test_collection_self_overlap() {
        let empty: Collection = Collection::new();
        assert!(!empty.is_self_overlapping());

        let single: Collection =
            Collection::from_records(vec![Record::new(1, interval(0, 10))]);
        assert!(!single.is_self_overlapping());

        let chain: Collection = Collection::from_records(vec![
            Record::new(1, interval(0, 5)),
            Record::new(2, interval(5, 10)),
            Record::new(3, interval(12, 20)),
        ]);
        assert!(!chain.is_self_overlapping());

        // Detection must not depend on input order
        let unsorted: Collection = Collection::from_records(vec![
            Record::new(1, interval(12, 20)),
            Record::new(2, interval(0, 5)),
            Record::new(3, interval(4, 10)),
        ]);
        assert!(unsorted.is_self_overlapping());
    }

    #[test]
    fn test_partition_non_overlapping() {
        let collection: Collection = Collection::from_records(vec![
            Record::new(1, interval(0, 10)),
            Record::new(2, interval(5, 15)),
            Record::new(3, interval(20, 30)),
            Record::new(4, interval(25, 40)),
        ]);

        let (chain, remainder) = collection.partition_non_overlapping();
        assert_eq!(chain.len(), 2);
        assert_eq!(remainder.len(), 2);
        assert!(!chain.is_self_overlapping());
        assert_eq!(chain.get(0).unwrap().id, RecordId::from(1));
        assert_eq!(chain.get(1).unwrap().id, RecordId::from(3));
        assert_eq!(remainder.get(0).unwrap().id, RecordId::from(2));
        assert_eq!(remainder.get(1).unwrap().id, RecordId::from(4));
    }

    #[test]
    fn test_sorted_by_start_is_stable() {
        let collection: Collection = Collection::from_records(vec![
            Record::new(1, interval(10, 20)),
            Record::new(2, interval(0, 5)),
            Record::new(3, interval(10, 15)),
        ]);

        let sorted = collection.sorted_by_start();
        assert_eq!(sorted.get(0).unwrap().id, RecordId::from(2));
        // Equal starts keep input order
        assert_eq!(sorted.get(1).unwrap().id, RecordId::from(1));
        assert_eq!(sorted.get(2).unwrap().id, RecordId::from(3));
    }

    #[test]
    fn test_options_validation() {
        assert!(ColocOptions::default().validate().is_ok());
        assert_eq!(
            ColocOptions::default().overlap_fallback_threshold,
            ColocOptions::DEFAULT_OVERLAP_FALLBACK_THRESHOLD
        );

        let zero = ColocOptions::default().with_overlap_fallback_threshold(0.0);
        assert!(zero.validate().is_ok());

        let one = ColocOptions::default().with_overlap_fallback_threshold(1.0);
        assert!(one.validate().is_ok());

        let too_big = ColocOptions::default().with_overlap_fallback_threshold(1.5);
        assert!(too_big.validate().is_err());

        let nan = ColocOptions::default().with_overlap_fallback_threshold(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_options_json_roundtrip() {
        let options = ColocOptions::default().with_overlap_fallback_threshold(0.25);
        let json = options.to_json().unwrap();
        let loaded = ColocOptions::from_json(&json).unwrap();
        assert_eq!(loaded, options);

        // Missing field falls back to the default
        let loaded = ColocOptions::from_json("{}").unwrap();
        assert_eq!(
            loaded.overlap_fallback_threshold,
            ColocOptions::DEFAULT_OVERLAP_FALLBACK_THRESHOLD
        );

        // Out-of-range threshold is rejected at load time
        assert!(ColocOptions::from_json(r#"{ "overlap_fallback_threshold": 2.0 }"#).is_err());
    }

    #[test]
    fn test_match_set_operations() {
        let mut matches = MatchSet::new();
        assert!(matches.is_empty());

        matches.push(0, 1);
        matches.push(2, 0);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches.pairs(), &[(0, 1), (2, 0)]);

        let mut other = MatchSet::new();
        other.push(1, 1);
        matches.merge(other);
        assert_eq!(matches.len(), 3);

        let flipped = matches.clone().flipped();
        assert_eq!(flipped.pairs(), &[(1, 0), (0, 2), (1, 1)]);

        assert_eq!(matches.sorted_pairs(), vec![(0, 1), (1, 1), (2, 0)]);
    }
}
