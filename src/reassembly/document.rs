//! Reassembler for JSON documents split into `p<index>of<total>` frames.
//!
//! Completion is layered. Structural completion only counts slots; semantic
//! validity additionally requires the assembled text to parse as a JSON
//! object holding the configured key. Both are computed on demand from the
//! slots so they can never disagree with the stored fragments.

use std::num::NonZeroU32;

use serde_json::Value;

use super::{MultiPartReassembler, PartGrammar, PartSeries, PartStatus, ReassemblyError};

/// Key a wallet export must contain to be trusted.
pub const DEFAULT_DOCUMENT_KEY: &str = "descriptor";

/// Outcome of checking an assembled document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentValidity {
    /// Parts are still missing.
    Incomplete,
    /// All parts arrived but the text is not valid JSON.
    InvalidJson,
    /// The JSON parsed but is not an object holding the required key.
    MissingKey,
    /// The document parsed and holds the required key.
    Valid,
}

/// Collects a JSON document, normally a wallet descriptor export.
#[derive(Clone, Debug)]
pub struct DocumentReassembler {
    inner: MultiPartReassembler,
    required_key: String,
}

impl Default for DocumentReassembler {
    fn default() -> Self { Self::new(DEFAULT_DOCUMENT_KEY) }
}

impl DocumentReassembler {
    /// Create an empty reassembler trusting documents that hold `required_key`.
    #[must_use]
    pub fn new(required_key: impl Into<String>) -> Self {
        Self {
            inner: MultiPartReassembler::new(PartGrammar::HeaderOptional),
            required_key: required_key.into(),
        }
    }

    /// Create an empty reassembler that refuses totals above `max_parts`.
    #[must_use]
    pub fn with_max_parts(required_key: impl Into<String>, max_parts: NonZeroU32) -> Self {
        Self {
            inner: MultiPartReassembler::with_max_parts(PartGrammar::HeaderOptional, max_parts),
            required_key: required_key.into(),
        }
    }

    /// Feed one frame. A frame without a header is the whole document.
    ///
    /// # Errors
    ///
    /// See [`MultiPartReassembler::receive_part`].
    pub fn receive_part(&mut self, frame: &str) -> Result<PartStatus, ReassemblyError> {
        self.inner.receive_part(frame)
    }

    /// Key the document must hold to be semantically valid.
    #[must_use]
    pub fn required_key(&self) -> &str { &self.required_key }

    /// Borrow the slot series for progress reporting.
    #[must_use]
    pub const fn series(&self) -> &PartSeries { self.inner.series() }

    /// Whether every slot is filled, by count alone.
    #[must_use]
    pub fn is_structurally_complete(&self) -> bool { self.inner.is_complete() }

    /// Whether the assembled text is a JSON object holding the required key.
    ///
    /// Never fails: malformed JSON and incomplete transfers report `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrstream::reassembly::DocumentReassembler;
    /// let mut reassembler = DocumentReassembler::default();
    /// reassembler.receive_part("p1of2 {\"descrip").expect("first part");
    /// assert!(!reassembler.is_semantically_valid());
    /// reassembler
    ///     .receive_part("p2of2 tor\":\"wpkh(...)\"}")
    ///     .expect("second part");
    /// assert!(reassembler.is_structurally_complete());
    /// assert!(reassembler.is_semantically_valid());
    /// ```
    #[must_use]
    pub fn is_semantically_valid(&self) -> bool { self.validity() == DocumentValidity::Valid }

    /// Classify the assembled document.
    #[must_use]
    pub fn validity(&self) -> DocumentValidity {
        let Ok(text) = self.inner.assembled_payload() else {
            return DocumentValidity::Incomplete;
        };
        match serde_json::from_str::<Value>(&text) {
            Err(_) => DocumentValidity::InvalidJson,
            Ok(document) if document.get(&self.required_key).is_some() => DocumentValidity::Valid,
            Ok(_) => DocumentValidity::MissingKey,
        }
    }

    /// Assembled document text, available once structurally complete.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] while parts are missing.
    pub fn assembled_payload(&self) -> Result<String, ReassemblyError> {
        self.inner.assembled_payload()
    }

    /// Parsed document, when semantically valid.
    #[must_use]
    pub fn document(&self) -> Option<Value> {
        let text = self.inner.assembled_payload().ok()?;
        let document: Value = serde_json::from_str(&text).ok()?;
        document.get(&self.required_key)?;
        Some(document)
    }

    /// Value stored under the required key, when semantically valid.
    ///
    /// String values are returned without JSON quoting; any other value is
    /// rendered as JSON text.
    #[must_use]
    pub fn descriptor(&self) -> Option<String> {
        let document = self.document()?;
        let value = document.get(&self.required_key)?;
        Some(
            value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_owned),
        )
    }
}
