//! Reassembly engines for animated-QR transfers.
//!
//! Each wire format has its own engine. The fixed-order engines share the
//! slot-filling [`PartSeries`] through [`MultiPartReassembler`]; the
//! fountain engine wraps an external decoder. [`Reassembler`] unifies the
//! three behind one enum so a scan loop can hold any of them.

pub mod binary;
pub mod document;
pub mod error;
pub mod fountain;
pub mod multipart;
pub mod series;

pub use binary::Base64Reassembler;
pub use document::{DEFAULT_DOCUMENT_KEY, DocumentReassembler, DocumentValidity};
pub use error::{PartStatus, ReassemblyError, SequenceState, SeriesState};
pub use fountain::{FountainDecoder, FountainError, FountainProgress, FountainReassembler};
pub use multipart::{MultiPartReassembler, PartGrammar};
pub use series::{DEFAULT_MAX_PARTS, PartSeries};

use std::num::NonZeroU32;

use crate::format::{Format, PartEncoding};

/// Boxed fountain decoder held by a [`Reassembler`].
pub type BoxedFountainDecoder = Box<dyn FountainDecoder + Send>;

/// Any of the three reassembly engines.
#[derive(Debug)]
pub enum Reassembler {
    /// Base64 multi-part transfer.
    Base64(Base64Reassembler),
    /// JSON document multi-part transfer.
    Document(DocumentReassembler),
    /// Fountain-coded transfer.
    Fountain(FountainReassembler<BoxedFountainDecoder>),
}

impl Reassembler {
    /// Engine for a `p<index>of<total>` transfer with the given content.
    #[must_use]
    pub fn multipart(encoding: PartEncoding, document_key: &str, max_parts: NonZeroU32) -> Self {
        match encoding {
            PartEncoding::Base64 => Self::Base64(Base64Reassembler::with_max_parts(max_parts)),
            PartEncoding::Document => {
                Self::Document(DocumentReassembler::with_max_parts(document_key, max_parts))
            }
        }
    }

    /// Engine for a fountain-coded transfer driven by `decoder`.
    #[must_use]
    pub fn fountain(decoder: BoxedFountainDecoder) -> Self {
        Self::Fountain(FountainReassembler::new(decoder))
    }

    /// Wire format handled by this engine.
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::Base64(_) => Format::PrefixedMultiPart(PartEncoding::Base64),
            Self::Document(_) => Format::PrefixedMultiPart(PartEncoding::Document),
            Self::Fountain(_) => Format::FountainCoded,
        }
    }

    /// Feed one frame.
    ///
    /// # Errors
    ///
    /// Forwards the engine's [`ReassemblyError`]. Only errors for which
    /// [`ReassemblyError::is_fatal`] holds invalidate the transfer.
    pub fn receive_part(&mut self, frame: &str) -> Result<PartStatus, ReassemblyError> {
        match self {
            Self::Base64(inner) => inner.receive_part(frame),
            Self::Document(inner) => inner.receive_part(frame),
            Self::Fountain(inner) => inner.receive_part(frame),
        }
    }

    /// Whether the transfer is complete. For documents this is structural
    /// completion; see [`Reassembler::is_semantically_valid`].
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Base64(inner) => inner.is_complete(),
            Self::Document(inner) => inner.is_structurally_complete(),
            Self::Fountain(inner) => inner.is_complete(),
        }
    }

    /// Whether the payload can be trusted downstream.
    ///
    /// Documents must pass the JSON key check; the other engines are trusted
    /// once complete.
    #[must_use]
    pub fn is_semantically_valid(&self) -> bool {
        match self {
            Self::Document(inner) => inner.is_semantically_valid(),
            Self::Base64(_) | Self::Fountain(_) => self.is_complete(),
        }
    }

    /// Assembled payload text.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] until the transfer completes.
    pub fn assembled_payload(&self) -> Result<String, ReassemblyError> {
        match self {
            Self::Base64(inner) => inner.assembled_payload(),
            Self::Document(inner) => inner.assembled_payload(),
            Self::Fountain(inner) => inner.assembled_payload(),
        }
    }

    /// Parts received so far and parts expected, for progress display.
    ///
    /// Fountain transfers have no fixed part count and report `(0, None)`.
    #[must_use]
    pub fn progress(&self) -> (usize, Option<u32>) {
        match self {
            Self::Base64(inner) => (inner.series().received(), inner.series().expected()),
            Self::Document(inner) => (inner.series().received(), inner.series().expected()),
            Self::Fountain(_) => (0, None),
        }
    }

    /// Snapshot of completion and payload.
    #[must_use]
    pub fn sequence_state(&self) -> SequenceState {
        SequenceState {
            done: self.is_complete(),
            payload: self.assembled_payload().ok(),
        }
    }
}
