//! Outcomes and errors of a scan session.

use thiserror::Error;

use crate::{format::Format, reassembly::ReassemblyError};

/// Why a frame was skipped without affecting the transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The first frame carried no known header and the policy rejects it.
    Unrecognized,
    /// The frame belongs to a different wire family than the session.
    FormatMismatch {
        /// Format chosen from the session's first frame.
        session: Format,
        /// Format of the skipped frame.
        frame: Format,
    },
    /// The reassembler refused the frame with a non-fatal error.
    Rejected(ReassemblyError),
}

/// Result of feeding one frame into a [`ScanSession`](super::ScanSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanProgress {
    /// The frame was stored and the transfer needs more.
    Collecting {
        /// Parts stored so far; zero for fountain transfers.
        received: usize,
        /// Parts expected, when the format numbers them.
        expected: Option<u32>,
    },
    /// The frame repeated one already seen, or arrived after completion.
    Duplicate,
    /// The transfer is complete.
    Complete,
    /// The frame was ignored.
    Skipped(SkipReason),
}

/// Errors that end or block a scan session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The transfer is inconsistent and must be scanned again from scratch.
    #[error("transfer corrupted, restart the scan: {0}")]
    Corrupt(ReassemblyError),
    /// A frame was fed after the session was corrupted.
    #[error("session is corrupted; reset it before feeding more frames")]
    Poisoned,
    /// A fountain-coded frame arrived but no decoder was configured.
    #[error("no fountain decoder is configured for UR:CRYPTO-PSBT frames")]
    FountainUnavailable,
    /// A query failed, typically because the transfer is incomplete.
    #[error(transparent)]
    Reassembly(#[from] ReassemblyError),
}
