//! Adapter around an external fountain-code decoder.
//!
//! The erasure-coding algorithm behind `UR:CRYPTO-PSBT/` frames lives
//! outside this crate. Hosts plug a decoder in through [`FountainDecoder`];
//! [`FountainReassembler`] only normalises its result into base64 text so
//! every reassembler hands out the same kind of payload.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use ciborium::Value;
use thiserror::Error;

use super::{PartStatus, ReassemblyError};

/// Progress reported by a [`FountainDecoder`] after each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FountainProgress {
    /// More frames are required.
    NeedMore,
    /// Decoding finished; carries the CBOR-encoded message.
    Done(Vec<u8>),
}

/// Errors raised by a fountain decoder or while normalising its result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FountainError {
    /// The decoder rejected a frame.
    #[error("frame rejected: {0}")]
    Rejected(String),
    /// The decoded message is not a CBOR byte string.
    #[error("decoded message is not a CBOR byte string: {0}")]
    Cbor(String),
}

/// Contract of the external fountain-code decoder.
///
/// A decoder is fed every scanned frame in arrival order and reports
/// [`FountainProgress::Done`] once it can reconstruct the message. A
/// rejected frame must leave the decoder usable for further frames.
pub trait FountainDecoder {
    /// Feed one frame.
    ///
    /// # Errors
    ///
    /// Returns [`FountainError::Rejected`] when the frame cannot be used.
    fn feed(&mut self, frame: &str) -> Result<FountainProgress, FountainError>;
}

impl<D: FountainDecoder + ?Sized> FountainDecoder for Box<D> {
    fn feed(&mut self, frame: &str) -> Result<FountainProgress, FountainError> {
        (**self).feed(frame)
    }
}

/// Reassembler for fountain-coded transfers.
pub struct FountainReassembler<D> {
    decoder: D,
    payload: Option<String>,
}

impl<D> fmt::Debug for FountainReassembler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FountainReassembler")
            .field("complete", &self.payload.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: FountainDecoder> FountainReassembler<D> {
    /// Wrap `decoder`.
    #[must_use]
    pub const fn new(decoder: D) -> Self {
        Self {
            decoder,
            payload: None,
        }
    }

    /// Feed one frame. Frames arriving after completion are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Decode`] when the decoder rejects the frame
    /// or produces something other than a CBOR byte string. The transfer
    /// stays usable and further frames may be fed.
    pub fn receive_part(&mut self, frame: &str) -> Result<PartStatus, ReassemblyError> {
        if self.payload.is_some() {
            return Ok(PartStatus::Duplicate);
        }
        match self.decoder.feed(frame)? {
            FountainProgress::NeedMore => Ok(PartStatus::Incomplete),
            FountainProgress::Done(message) => {
                let bytes = decode_cbor_bytes(&message)?;
                self.payload = Some(STANDARD.encode(bytes));
                Ok(PartStatus::Complete)
            }
        }
    }

    /// Whether the decoder has produced the message.
    #[must_use]
    pub const fn is_complete(&self) -> bool { self.payload.is_some() }

    /// Base64 text of the decoded message.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] until the decoder finishes.
    pub fn assembled_payload(&self) -> Result<String, ReassemblyError> {
        self.payload.clone().ok_or(ReassemblyError::NotComplete {
            received: 0,
            expected: 0,
        })
    }

    /// Consume the reassembler, returning the decoder.
    #[must_use]
    pub fn into_decoder(self) -> D { self.decoder }
}

/// Unwrap the byte string carried by a CBOR message, looking through tags.
pub(crate) fn decode_cbor_bytes(message: &[u8]) -> Result<Vec<u8>, FountainError> {
    let mut value: Value =
        ciborium::from_reader(message).map_err(|err| FountainError::Cbor(err.to_string()))?;
    loop {
        match value {
            Value::Bytes(bytes) => return Ok(bytes),
            Value::Tag(_, inner) => value = *inner,
            other => return Err(FountainError::Cbor(format!("found {other:?}"))),
        }
    }
}
