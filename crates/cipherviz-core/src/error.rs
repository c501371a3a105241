//! Error types for cipherviz-core.
//!
//! Uses `thiserror` for structured, matchable variants. Engines never return
//! these from `encrypt`/`decrypt`; an invalid configuration becomes an
//! error-flagged trace instead. They surface from the explicit checks
//! ([`RailFenceEngine::check_rails`](crate::rail_fence::RailFenceEngine::check_rails))
//! and from trace validation.

use thiserror::Error;

use crate::id::StepId;

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The rail fence needs at least two rails to zig-zag.
    #[error("rail count must be at least 2, got {rails}")]
    InvalidRails { rails: i64 },

    /// `rails x columns` exceeds the grid cell limit.
    #[error("a {rails}x{cols} grid exceeds the limit of {limit} cells")]
    GridTooLarge { rails: i64, cols: usize, limit: usize },
}

/// A trace that breaks one of the structural invariants, or could not be decoded.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace has no records at all.
    #[error("trace is empty")]
    Empty,

    /// Record ids must run 0, 1, 2, ... with no gaps.
    #[error("expected record id {expected}, found {found}")]
    NonContiguousId { expected: StepId, found: StepId },

    /// A record other than the last is flagged final.
    #[error("record {id} is flagged final but is not the last record")]
    MisplacedFinal { id: StepId },

    /// The last record is not flagged final.
    #[error("last record {id} is not flagged final")]
    MissingFinal { id: StepId },

    /// Only error traces may consist of a single record.
    #[error("trace has {len} record(s); at least 2 are required outside an error")]
    TooShort { len: usize },

    /// `resultSoFar` must only ever grow.
    #[error("result shrank at record {id}")]
    ResultShrank { id: StepId },

    /// Rail fence and Caesar records cannot be mixed in one trace.
    #[error("record {id} belongs to a different engine than record 0")]
    MixedEngines { id: StepId },

    /// Rail fence grids keep the same dimensions for the whole trace.
    #[error("grid at record {id} is {found_rows}x{found_cols}, expected {rows}x{cols}")]
    GridDimensions {
        id: StepId,
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// A saved output whose text disagrees with its own trace.
    #[error("output text {text:?} does not match the trace result {result:?}")]
    OutputMismatch { text: String, result: String },

    /// JSON decoding failed.
    #[error("malformed trace json: {0}")]
    Json(#[from] serde_json::Error),
}
