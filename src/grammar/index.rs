//! One-based part positioning within a multi-part transfer.

use derive_more::{Display, From};

/// One-based ordinal naming a frame's position in a `p<index>of<total>`
/// sequence.
///
/// # Examples
///
/// ```
/// use qrstream::grammar::PartIndex;
/// let index = PartIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert_eq!(index.slot(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct PartIndex(u32);

impl PartIndex {
    /// Construct an index from its one-based value.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// The first part of every sequence.
    #[must_use]
    pub const fn first() -> Self { Self(1) }

    /// Return the one-based value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Zero-based slot this part occupies.
    ///
    /// Saturates at zero so a malformed index cannot underflow; headers are
    /// validated before slots are addressed.
    #[must_use]
    pub fn slot(self) -> usize { self.0.saturating_sub(1) as usize }
}

impl From<PartIndex> for u32 {
    fn from(value: PartIndex) -> Self { value.0 }
}
