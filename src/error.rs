//! Error types for colocation calls.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ColocError>;

/// Errors surfaced by colocation.
///
/// The matching routines are pure and deterministic, so nothing is retried
/// internally; every error aborts the call without partial results.
#[derive(Error, Debug)]
pub enum ColocError {
    /// Malformed input that is not tied to a single record.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record carries an interval whose start lies after its end.
    #[error("record {index}: interval start is after end")]
    InvalidInterval { index: usize },

    /// An overlap-removal pass failed to produce a non-self-overlapping
    /// chain. This signals corrupted interval data or a logic bug and is
    /// never retried.
    #[error("overlap removal left {remaining} records still self-overlapping")]
    OverlapNotReduced { remaining: usize },

    /// JSON (de)serialization failure, e.g. while loading options.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
