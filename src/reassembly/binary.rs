//! Reassembler for base64 payloads split into `p<index>of<total>` frames.

use std::num::NonZeroU32;

use base64::{Engine, engine::general_purpose::STANDARD};

use super::{MultiPartReassembler, PartGrammar, PartSeries, PartStatus, ReassemblyError};

/// Collects base64 fragments of a binary payload, normally a PSBT.
///
/// Every frame must carry a header. The assembled text is handed out
/// unchanged by [`assembled_payload`](Self::assembled_payload);
/// [`decoded_payload`](Self::decoded_payload) additionally decodes it.
///
/// # Examples
///
/// ```
/// use qrstream::reassembly::{Base64Reassembler, PartStatus};
/// let mut reassembler = Base64Reassembler::new();
/// assert_eq!(reassembler.receive_part("p2of2 sbG8="), Ok(PartStatus::Incomplete));
/// assert_eq!(reassembler.receive_part("p1of2 aGV"), Ok(PartStatus::Complete));
/// assert_eq!(reassembler.decoded_payload().as_deref(), Ok(&b"hello"[..]));
/// ```
#[derive(Clone, Debug)]
pub struct Base64Reassembler {
    inner: MultiPartReassembler,
}

impl Default for Base64Reassembler {
    fn default() -> Self { Self::new() }
}

impl Base64Reassembler {
    /// Create an empty reassembler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: MultiPartReassembler::new(PartGrammar::HeaderRequired),
        }
    }

    /// Create an empty reassembler that refuses totals above `max_parts`.
    #[must_use]
    pub const fn with_max_parts(max_parts: NonZeroU32) -> Self {
        Self {
            inner: MultiPartReassembler::with_max_parts(PartGrammar::HeaderRequired, max_parts),
        }
    }

    /// Feed one frame.
    ///
    /// # Errors
    ///
    /// See [`MultiPartReassembler::receive_part`].
    pub fn receive_part(&mut self, frame: &str) -> Result<PartStatus, ReassemblyError> {
        self.inner.receive_part(frame)
    }

    /// Whether every part has been received.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.inner.is_complete() }

    /// Borrow the slot series for progress reporting.
    #[must_use]
    pub const fn series(&self) -> &PartSeries { self.inner.series() }

    /// Concatenated base64 text.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] while parts are missing.
    pub fn assembled_payload(&self) -> Result<String, ReassemblyError> {
        self.inner.assembled_payload()
    }

    /// Decode the concatenated base64 text into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] while parts are missing and
    /// [`ReassemblyError::InvalidBase64`] when the text does not decode.
    pub fn decoded_payload(&self) -> Result<Vec<u8>, ReassemblyError> {
        let text = self.assembled_payload()?;
        Ok(STANDARD.decode(text)?)
    }
}
