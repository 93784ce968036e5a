//! Slot-filling tracker shared by the fixed-order reassemblers.
//!
//! `PartSeries` owns the generic algorithm: the first frame fixes the total
//! and allocates one slot per part, each later frame fills its slot at most
//! once, and the series completes when every slot is filled. Frames may
//! arrive in any order and may repeat.

use std::num::NonZeroU32;

use super::{PartStatus, ReassemblyError, SeriesState, SequenceState};
use crate::grammar::{HeaderError, PartHeader, PartIndex};

/// Default cap on the number of parts a single transfer may declare.
pub const DEFAULT_MAX_PARTS: NonZeroU32 = match NonZeroU32::new(4096) {
    Some(limit) => limit,
    None => panic!("default part limit must be non-zero"),
};

/// Ordered slots for one multi-part transfer.
#[derive(Clone, Debug)]
pub struct PartSeries {
    max_parts: NonZeroU32,
    total: Option<u32>,
    slots: Vec<Option<String>>,
    filled: usize,
}

impl Default for PartSeries {
    fn default() -> Self { Self::new() }
}

impl PartSeries {
    /// Create an empty series with the default part limit.
    #[must_use]
    pub const fn new() -> Self { Self::with_max_parts(DEFAULT_MAX_PARTS) }

    /// Create an empty series that refuses totals above `max_parts`.
    #[must_use]
    pub const fn with_max_parts(max_parts: NonZeroU32) -> Self {
        Self {
            max_parts,
            total: None,
            slots: Vec::new(),
            filled: 0,
        }
    }

    /// Store `fragment` in the slot named by `header`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrstream::{
    ///     grammar::{PartHeader, PartIndex},
    ///     reassembly::{PartSeries, PartStatus},
    /// };
    /// let mut series = PartSeries::new();
    /// let second = PartHeader::new(PartIndex::new(2), 2).expect("valid header");
    /// let first = PartHeader::new(PartIndex::new(1), 2).expect("valid header");
    /// assert_eq!(series.accept(second, "lo"), Ok(PartStatus::Incomplete));
    /// assert_eq!(series.accept(second, "lo"), Ok(PartStatus::Duplicate));
    /// assert_eq!(series.accept(first, "hel"), Ok(PartStatus::Complete));
    /// assert_eq!(series.assembled().as_deref(), Ok("hello"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::SequenceIntegrity`] when `header` declares
    /// a different total than the first accepted frame, and
    /// [`ReassemblyError::TooManyParts`] when the first frame declares more
    /// parts than the configured limit. Neither error changes the series.
    pub fn accept(
        &mut self,
        header: PartHeader,
        fragment: &str,
    ) -> Result<PartStatus, ReassemblyError> {
        let total = header.total();
        match self.total {
            None => self.establish(total)?,
            Some(expected) if expected != total => {
                return Err(ReassemblyError::SequenceIntegrity {
                    expected,
                    found: total,
                });
            }
            Some(_) => {}
        }

        let index = header.index();
        let Some(slot) = self.slots.get_mut(index.slot()) else {
            return Err(HeaderError::IndexOutOfRange {
                index: index.get(),
                total,
            }
            .into());
        };
        if slot.is_some() {
            return Ok(PartStatus::Duplicate);
        }

        *slot = Some(fragment.to_owned());
        self.filled += 1;
        if self.is_complete() {
            Ok(PartStatus::Complete)
        } else {
            Ok(PartStatus::Incomplete)
        }
    }

    fn establish(&mut self, total: u32) -> Result<(), ReassemblyError> {
        if total > self.max_parts.get() {
            return Err(ReassemblyError::TooManyParts {
                total,
                limit: self.max_parts.get(),
            });
        }
        self.total = Some(total);
        self.slots = vec![None; total as usize];
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SeriesState {
        match self.total {
            None => SeriesState::Empty,
            Some(_) if self.is_complete() => SeriesState::Complete,
            Some(_) => SeriesState::Collecting,
        }
    }

    /// Whether every slot holds a fragment.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.total.is_some() && self.filled == self.slots.len() }

    /// Total established by the first accepted frame.
    #[must_use]
    pub const fn expected(&self) -> Option<u32> { self.total }

    /// Number of filled slots.
    #[must_use]
    pub const fn received(&self) -> usize { self.filled }

    /// One-based indices of the parts still missing.
    #[must_use]
    pub fn missing_indices(&self) -> Vec<PartIndex> {
        self.slots
            .iter()
            .zip(1u32..)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, index)| PartIndex::new(index))
            .collect()
    }

    /// Concatenate every fragment in slot order.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NotComplete`] while any slot is empty.
    pub fn assembled(&self) -> Result<String, ReassemblyError> {
        if !self.is_complete() {
            return Err(ReassemblyError::NotComplete {
                received: self.filled,
                expected: self.total.unwrap_or(0),
            });
        }
        Ok(self.slots.iter().flatten().map(String::as_str).collect())
    }

    /// Snapshot of completion and payload.
    #[must_use]
    pub fn sequence_state(&self) -> SequenceState {
        SequenceState {
            done: self.is_complete(),
            payload: self.assembled().ok(),
        }
    }
}
