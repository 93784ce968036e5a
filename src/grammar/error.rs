//! Errors raised while parsing a multi-part frame header.

use thiserror::Error;

/// Reasons a frame failed to yield a usable `p<index>of<total>` header.
///
/// Every variant is recoverable: a scanner may feed noisy text, so callers
/// treat these as "skip this frame" rather than aborting a transfer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The frame does not start with a `p<index>of<total>` header.
    #[error("frame does not carry a multi-part header")]
    Missing,
    /// A header field does not fit into a `u32`.
    #[error("multi-part header field overflows u32")]
    Overflow,
    /// The header declares zero parts.
    #[error("multi-part header declares a total of zero parts")]
    ZeroTotal,
    /// The part index is zero or exceeds the declared total.
    #[error("part index {index} out of range for total {total}")]
    IndexOutOfRange {
        /// One-based index carried by the frame.
        index: u32,
        /// Total carried by the frame.
        total: u32,
    },
}
