//! Error and status types emitted by the reassembly engines.
//!
//! Only [`ReassemblyError::SequenceIntegrity`] is fatal to a transfer; every
//! other error describes a single frame that can be skipped.

use thiserror::Error;

use super::FountainError;
use crate::grammar::HeaderError;

/// Result of feeding one frame into a reassembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartStatus {
    /// The transfer still expects more frames.
    Incomplete,
    /// The frame completed the transfer.
    Complete,
    /// The frame repeated a part that was already stored, or arrived after
    /// completion. Nothing changed.
    Duplicate,
}

/// Lifecycle of a slot-filling series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesState {
    /// No frame has been accepted yet and the total is unknown.
    Empty,
    /// The total is known and at least one slot is still empty.
    Collecting,
    /// Every slot is filled.
    Complete,
}

/// Snapshot of a transfer, queryable at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceState {
    /// Whether the transfer is complete.
    pub done: bool,
    /// Assembled payload, present only when `done` is true.
    pub payload: Option<String>,
}

/// Errors produced while reassembling a transfer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// The frame's multi-part header is missing or unusable.
    #[error("malformed multi-part header: {0}")]
    MalformedHeader(#[from] HeaderError),
    /// The frame declares a different total than the one already
    /// established for this transfer.
    #[error("sequence total changed unexpectedly: expected {expected}, found {found}")]
    SequenceIntegrity {
        /// Total established by the first accepted frame.
        expected: u32,
        /// Total declared by the offending frame.
        found: u32,
    },
    /// The frame declares more parts than the reassembler will buffer.
    #[error("sequence declares {total} parts, more than the limit of {limit}")]
    TooManyParts {
        /// Total declared by the frame.
        total: u32,
        /// Configured part limit.
        limit: u32,
    },
    /// The fountain decoder rejected the frame or its result.
    #[error("fountain decode failed: {0}")]
    Decode(#[from] FountainError),
    /// The payload was requested before the transfer completed.
    #[error("transfer incomplete: {received} of {expected} parts received")]
    NotComplete {
        /// Parts stored so far.
        received: usize,
        /// Parts expected, or zero while the total is unknown.
        expected: u32,
    },
    /// The assembled text is not valid base64.
    #[error("assembled payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl ReassemblyError {
    /// Whether the transfer must be discarded and restarted.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrstream::reassembly::ReassemblyError;
    /// let err = ReassemblyError::SequenceIntegrity { expected: 3, found: 4 };
    /// assert!(err.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool { matches!(self, Self::SequenceIntegrity { .. }) }
}
