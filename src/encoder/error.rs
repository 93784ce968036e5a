//! Errors raised while building an animated frame sequence.

use thiserror::Error;

/// Errors produced by [`FragmentEncoder`](crate::encoder::FragmentEncoder)
/// construction.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload was empty after newline normalisation.
    #[error("cannot encode an empty payload")]
    EmptyPayload,
    /// The payload needs more frames than a `p<index>of<total>` header can
    /// number.
    #[error("payload needs {frames} frames, more than the header can number")]
    TooManyFrames { frames: usize },
}
