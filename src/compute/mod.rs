//! Matching strategies: validation, partitioning, brute-force and sweep
//! matchers, and the overlap-resolving orchestrator.

pub mod validation;

mod brute;
mod coloc;
mod partition;
mod sweep;

pub use coloc::{colocate, colocate_with, match_all};

use crate::types::{Collection, TimeInterval};

/// Lightweight per-record view used by the matchers.
///
/// Carries the record's position in the caller-supplied collection through
/// every sort, partition and recursion, so emitted pairs always reference
/// original indices and no back-translation is needed.
pub(crate) struct Entry<'a, G> {
    pub idx: usize,
    pub interval: TimeInterval,
    pub footprint: Option<&'a G>,
}

impl<G> Clone for Entry<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for Entry<'_, G> {}

impl<'a, G> Entry<'a, G> {
    pub(crate) fn from_collection(collection: &'a Collection<G>) -> Vec<Self> {
        collection
            .iter()
            .enumerate()
            .map(|(idx, record)| Entry {
                idx,
                interval: record.interval,
                footprint: record.footprint.as_ref(),
            })
            .collect()
    }
}
