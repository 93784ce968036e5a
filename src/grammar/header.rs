//! `p<index>of<total>` header parsing.
//!
//! The header grammar is `^p(\d+)of(\d+)\s` with case-insensitive keywords.
//! Everything after the single separator character is the payload fragment,
//! kept verbatim so fragments may begin with or contain whitespace.

use super::{HeaderError, PartIndex};

/// Parsed `p<index>of<total>` header.
///
/// # Examples
///
/// ```
/// use qrstream::grammar::{PartHeader, PartIndex};
/// let header = PartHeader::new(PartIndex::new(2), 5).expect("valid header");
/// assert_eq!(header.index(), PartIndex::new(2));
/// assert_eq!(header.total(), 5);
/// assert!(!header.is_single());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartHeader {
    index: PartIndex,
    total: u32,
}

impl PartHeader {
    /// Build a header, validating `1 <= index <= total`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::ZeroTotal`] when `total` is zero and
    /// [`HeaderError::IndexOutOfRange`] when `index` falls outside `1..=total`.
    pub fn new(index: PartIndex, total: u32) -> Result<Self, HeaderError> {
        if total == 0 {
            return Err(HeaderError::ZeroTotal);
        }
        if index.get() == 0 || index.get() > total {
            return Err(HeaderError::IndexOutOfRange {
                index: index.get(),
                total,
            });
        }
        Ok(Self { index, total })
    }

    /// Header implied by a frame without any header at all.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            index: PartIndex::first(),
            total: 1,
        }
    }

    /// One-based position of the frame.
    #[must_use]
    pub const fn index(&self) -> PartIndex { self.index }

    /// Declared number of frames in the sequence.
    #[must_use]
    pub const fn total(&self) -> u32 { self.total }

    /// Whether the sequence consists of a single frame.
    #[must_use]
    pub const fn is_single(&self) -> bool { self.total == 1 }
}

/// Header digits and the fragment that follows them, before numeric
/// validation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawHeader<'a> {
    pub(crate) index: &'a str,
    pub(crate) total: &'a str,
    pub(crate) fragment: &'a str,
}

impl RawHeader<'_> {
    pub(crate) fn parse(&self) -> Result<PartHeader, HeaderError> {
        let index = parse_u32(self.index)?;
        let total = parse_u32(self.total)?;
        PartHeader::new(PartIndex::new(index), total)
    }
}

/// Split `frame` into header digits and fragment, or `None` when the frame
/// does not open with `p<digits>of<digits><whitespace>`.
pub(crate) fn split_header(frame: &str) -> Option<RawHeader<'_>> {
    let bytes = frame.as_bytes();
    if !bytes.first()?.eq_ignore_ascii_case(&b'p') {
        return None;
    }

    let index_end = digits_end(bytes, 1)?;
    let keyword = bytes.get(index_end..index_end + 2)?;
    if !keyword.eq_ignore_ascii_case(b"of") {
        return None;
    }

    let total_start = index_end + 2;
    let total_end = digits_end(bytes, total_start)?;
    if !bytes.get(total_end)?.is_ascii_whitespace() {
        return None;
    }

    // Every byte up to and including the separator is ASCII, so these are
    // all char boundaries.
    Some(RawHeader {
        index: &frame[1..index_end],
        total: &frame[total_start..total_end],
        fragment: &frame[total_end + 1..],
    })
}

/// Return the end of a non-empty run of ASCII digits starting at `start`.
fn digits_end(bytes: &[u8], start: usize) -> Option<usize> {
    let run = bytes
        .get(start..)?
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    (run > 0).then_some(start + run)
}

fn parse_u32(digits: &str) -> Result<u32, HeaderError> {
    digits.parse::<u32>().map_err(|_| HeaderError::Overflow)
}
