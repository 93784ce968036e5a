//! Frame format sniffing.
//!
//! [`classify`] inspects a single frame's textual prefix and names the
//! reassembly engine that should handle the transfer it belongs to. The
//! decision is made once per session, from the first frame observed.

use derive_more::Display;

use crate::grammar::{is_fountain_coded, is_prefixed_multipart, is_prefixed_multipart_base64};

/// Content carried by the fragments of a `p<index>of<total>` sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum PartEncoding {
    /// Fragments concatenate to base64 text, normally a PSBT.
    #[display("binary/base64")]
    Base64,
    /// Fragments concatenate to a JSON document, normally a wallet export.
    #[display("document")]
    Document,
}

/// Wire format of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Format {
    /// A complete payload that fits one frame and carries no header.
    ///
    /// [`classify`] never returns this variant: headerless text is
    /// [`Format::Unrecognized`] until a caller decides to accept it as a
    /// plain payload.
    #[display("plain single frame")]
    PlainSingleFrame,
    /// A `p<index>of<total> <fragment>` frame.
    #[display("prefixed multi-part ({_0})")]
    PrefixedMultiPart(PartEncoding),
    /// A `UR:CRYPTO-PSBT/` fountain-coded frame.
    #[display("fountain coded")]
    FountainCoded,
    /// No supported prefix was found.
    #[display("unrecognized")]
    Unrecognized,
}

impl Format {
    /// Whether frames of `other` may be delivered to a session that started
    /// with `self`.
    ///
    /// The base64/document split is a per-frame content heuristic, so any
    /// multi-part frame belongs to a multi-part session regardless of its
    /// encoding. Fountain frames only belong to fountain sessions, and a
    /// headerless frame never joins a sequence that is already running.
    #[must_use]
    pub fn accepts(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::PrefixedMultiPart(_), Self::PrefixedMultiPart(_))
                | (Self::FountainCoded, Self::FountainCoded)
        )
    }
}

/// Select the wire format of `frame`.
///
/// # Examples
///
/// ```
/// use qrstream::format::{Format, PartEncoding, classify};
/// assert_eq!(classify("UR:CRYPTO-PSBT/1-3/lpad"), Format::FountainCoded);
/// assert_eq!(
///     classify("p1of3 aGVsbG8="),
///     Format::PrefixedMultiPart(PartEncoding::Base64)
/// );
/// assert_eq!(
///     classify("p1of2 {\"descriptor\":\"...\"}"),
///     Format::PrefixedMultiPart(PartEncoding::Document)
/// );
/// assert_eq!(classify("plain text, no header"), Format::Unrecognized);
/// ```
#[must_use]
pub fn classify(frame: &str) -> Format {
    if is_fountain_coded(frame) {
        Format::FountainCoded
    } else if is_prefixed_multipart(frame) {
        if is_prefixed_multipart_base64(frame) {
            Format::PrefixedMultiPart(PartEncoding::Base64)
        } else {
            Format::PrefixedMultiPart(PartEncoding::Document)
        }
    } else {
        Format::Unrecognized
    }
}
