//! The generic `p<index>of<total>` reassembly routine.
//!
//! Both fixed-order variants share [`MultiPartReassembler`]; they differ only
//! in the [`PartGrammar`] used to split each frame into header and fragment.

use std::num::NonZeroU32;

use log::debug;

use super::{PartSeries, PartStatus, ReassemblyError};
use crate::grammar::{HeaderError, PartHeader, split_multipart};

/// Strategy for extracting a header and fragment from one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartGrammar {
    /// Every frame must carry a header; headerless frames are malformed.
    HeaderRequired,
    /// A headerless frame is the whole payload, part 1 of 1.
    HeaderOptional,
}

impl PartGrammar {
    /// Split `frame` according to this strategy.
    ///
    /// # Errors
    ///
    /// Returns a [`HeaderError`] when the frame's header is missing (for
    /// [`PartGrammar::HeaderRequired`]) or unusable.
    pub fn split(self, frame: &str) -> Result<(PartHeader, &str), HeaderError> {
        match (self, split_multipart(frame)) {
            (Self::HeaderOptional, Err(HeaderError::Missing)) => Ok((PartHeader::single(), frame)),
            (_, parsed) => parsed,
        }
    }
}

/// Slot-filling reassembler parameterised by a [`PartGrammar`].
#[derive(Clone, Debug)]
pub struct MultiPartReassembler {
    grammar: PartGrammar,
    series: PartSeries,
}

impl MultiPartReassembler {
    /// Create a reassembler using `grammar` and the default part limit.
    #[must_use]
    pub const fn new(grammar: PartGrammar) -> Self {
        Self {
            grammar,
            series: PartSeries::new(),
        }
    }

    /// Create a reassembler that refuses totals above `max_parts`.
    #[must_use]
    pub const fn with_max_parts(grammar: PartGrammar, max_parts: NonZeroU32) -> Self {
        Self {
            grammar,
            series: PartSeries::with_max_parts(max_parts),
        }
    }

    /// Feed one frame.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::MalformedHeader`] for frames the grammar
    /// cannot split, and any error raised by [`PartSeries::accept`].
    pub fn receive_part(&mut self, frame: &str) -> Result<PartStatus, ReassemblyError> {
        let (header, fragment) = self.grammar.split(frame)?;
        let status = self.series.accept(header, fragment)?;
        match status {
            PartStatus::Duplicate => {
                debug!(
                    "duplicate part ignored: index={}, total={}",
                    header.index(),
                    header.total()
                );
            }
            PartStatus::Complete => {
                debug!("multi-part sequence complete: total={}", header.total());
            }
            PartStatus::Incomplete => {}
        }
        Ok(status)
    }

    /// Grammar used to split frames.
    #[must_use]
    pub const fn grammar(&self) -> PartGrammar { self.grammar }

    /// Borrow the underlying slot series.
    #[must_use]
    pub const fn series(&self) -> &PartSeries { &self.series }

    /// Whether every part has been received.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.series.is_complete() }

    /// Concatenated fragments.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] while parts are missing.
    pub fn assembled_payload(&self) -> Result<String, ReassemblyError> { self.series.assembled() }
}
