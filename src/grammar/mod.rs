//! Recognisers for the animated-QR frame formats.
//!
//! Three wire formats share the scanner:
//!
//! - fountain-coded frames prefixed with `UR:CRYPTO-PSBT/`,
//! - `p<index>of<total> <fragment>` multi-part frames, carrying either
//!   base64 text or an opaque document fragment,
//! - plain frames with no header, which stand for a complete payload.
//!
//! Every function here is pure and never panics on malformed input.

pub mod error;
pub mod header;
pub mod index;

pub use error::HeaderError;
pub use header::PartHeader;
pub use index::PartIndex;

use header::split_header;

/// Case-insensitive prefix of fountain-coded PSBT frames.
pub const FOUNTAIN_PREFIX: &str = "UR:CRYPTO-PSBT/";

/// Report whether `frame` is a fountain-coded PSBT frame.
///
/// # Examples
///
/// ```
/// use qrstream::grammar::is_fountain_coded;
/// assert!(is_fountain_coded("ur:crypto-psbt/1-3/lpadaxcs"));
/// assert!(!is_fountain_coded("p1of3 aGVsbG8="));
/// ```
#[must_use]
pub fn is_fountain_coded(frame: &str) -> bool {
    frame
        .as_bytes()
        .get(..FOUNTAIN_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FOUNTAIN_PREFIX.as_bytes()))
}

/// Report whether `frame` opens with a `p<index>of<total>` header followed
/// by whitespace.
#[must_use]
pub fn is_prefixed_multipart(frame: &str) -> bool { split_header(frame).is_some() }

/// Report whether `frame` is a multi-part frame whose fragment consists only
/// of base64 alphabet characters.
///
/// # Examples
///
/// ```
/// use qrstream::grammar::is_prefixed_multipart_base64;
/// assert!(is_prefixed_multipart_base64("p1of3 aGVsbG8="));
/// assert!(!is_prefixed_multipart_base64("p1of2 {\"descriptor\":\"x\"}"));
/// ```
#[must_use]
pub fn is_prefixed_multipart_base64(frame: &str) -> bool {
    split_header(frame).is_some_and(|raw| {
        !raw.fragment.is_empty() && raw.fragment.bytes().all(is_base64_alphabet)
    })
}

/// Extract the `(index, total)` header of a multi-part frame.
///
/// # Errors
///
/// Returns [`HeaderError::Missing`] when the frame has no header, and the
/// other [`HeaderError`] variants when the header numbers are unusable.
pub fn parse_multipart_header(frame: &str) -> Result<PartHeader, HeaderError> {
    split_header(frame).ok_or(HeaderError::Missing)?.parse()
}

/// Return the fragment carried by `frame`, or the whole frame when it has no
/// multi-part header.
///
/// # Examples
///
/// ```
/// use qrstream::grammar::strip_multipart_header;
/// assert_eq!(strip_multipart_header("p2of3  worl"), " worl");
/// assert_eq!(strip_multipart_header("just one frame"), "just one frame");
/// ```
#[must_use]
pub fn strip_multipart_header(frame: &str) -> &str {
    split_header(frame).map_or(frame, |raw| raw.fragment)
}

/// Split a frame into its header and fragment in one pass.
///
/// # Errors
///
/// Same conditions as [`parse_multipart_header`].
pub fn split_multipart(frame: &str) -> Result<(PartHeader, &str), HeaderError> {
    let raw = split_header(frame).ok_or(HeaderError::Missing)?;
    Ok((raw.parse()?, raw.fragment))
}

const fn is_base64_alphabet(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'=')
}

#[cfg(test)]
mod tests;
