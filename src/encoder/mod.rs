//! Sender side of an animated-QR transfer.
//!
//! [`FragmentEncoder`] splits a payload into `p<index>of<total>` frames once,
//! at construction, and then serves them cyclically so a display loop can
//! show one frame per tick for as long as the receiver keeps scanning.

pub mod error;

pub use error::EncodeError;

use std::num::NonZeroUsize;

use base64::{Engine, engine::general_purpose::STANDARD};
use log::debug;

use crate::{
    config::{DEFAULT_FRAGMENT_SIZE, TransferConfig},
    format::{Format, classify},
};

/// Cyclic source of display frames for one payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentEncoder {
    frames: Vec<String>,
    cursor: usize,
    delivered_once: bool,
}

impl FragmentEncoder {
    /// Split `payload` into frames carrying at most `fragment_size` bytes of
    /// payload each.
    ///
    /// One trailing `\n` is dropped first. A payload that fits a single
    /// fragment is emitted as one headerless frame. Fragments never split a
    /// UTF-8 character; a character wider than `fragment_size` travels alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use qrstream::encoder::FragmentEncoder;
    /// let size = NonZeroUsize::new(5).expect("non-zero");
    /// let encoder = FragmentEncoder::new("hello world", size).expect("encode");
    /// assert_eq!(encoder.frames(), ["p1of3 hello", "p2of3  worl", "p3of3 d"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyPayload`] if nothing remains after
    /// normalisation, and [`EncodeError::TooManyFrames`] if the frame count
    /// does not fit the header.
    pub fn new(payload: &str, fragment_size: NonZeroUsize) -> Result<Self, EncodeError> {
        let payload = payload.strip_suffix('\n').unwrap_or(payload);
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }

        let chunks = split_chunks(payload, fragment_size.get());
        let frames = if let [single] = chunks.as_slice() {
            vec![(*single).to_owned()]
        } else {
            let total = u32::try_from(chunks.len()).map_err(|_| EncodeError::TooManyFrames {
                frames: chunks.len(),
            })?;
            chunks
                .iter()
                .zip(1u32..)
                .map(|(chunk, index)| format!("p{index}of{total} {chunk}"))
                .collect()
        };
        debug!(
            "encoded {} payload bytes into {} frames",
            payload.len(),
            frames.len()
        );

        Ok(Self {
            frames,
            cursor: 0,
            delivered_once: false,
        })
    }

    /// Encoder using the default fragment size of 65 bytes.
    ///
    /// # Errors
    ///
    /// See [`FragmentEncoder::new`].
    pub fn with_default_size(payload: &str) -> Result<Self, EncodeError> {
        Self::new(payload, DEFAULT_FRAGMENT_SIZE)
    }

    /// Encoder using the fragment size from `config`.
    ///
    /// # Errors
    ///
    /// See [`FragmentEncoder::new`].
    pub fn from_config(payload: &str, config: &TransferConfig) -> Result<Self, EncodeError> {
        Self::new(payload, config.fragment_size)
    }

    /// Base64-encode `payload` and fragment the resulting text.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyPayload`] for empty input.
    pub fn for_binary(payload: &[u8], fragment_size: NonZeroUsize) -> Result<Self, EncodeError> {
        Self::new(&STANDARD.encode(payload), fragment_size)
    }

    /// Return the frame under the cursor and advance it, wrapping after the
    /// last frame.
    pub fn next_frame(&mut self) -> &str {
        let current = self.cursor;
        self.cursor += 1;
        if self.cursor == self.frames.len() {
            self.cursor = 0;
            self.delivered_once = true;
        }
        &self.frames[current]
    }

    /// Whether every frame has been served at least once.
    #[must_use]
    pub const fn has_completed_a_cycle(&self) -> bool { self.delivered_once }

    /// Restart serving from the first frame and clear the cycle flag.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.delivered_once = false;
    }

    /// Number of frames in one cycle.
    #[expect(
        clippy::len_without_is_empty,
        reason = "construction rejects empty payloads"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.frames.len() }

    /// All frames in display order.
    #[must_use]
    pub fn frames(&self) -> &[String] { &self.frames }

    /// Frame at zero-based `position`, if any.
    #[must_use]
    pub fn frame(&self, position: usize) -> Option<&str> {
        self.frames.get(position).map(String::as_str)
    }

    /// Whether the payload needed more than one frame.
    #[must_use]
    pub fn is_fragmented(&self) -> bool { self.frames.len() > 1 }

    /// Wire format a scanner will see for these frames.
    #[must_use]
    pub fn format(&self) -> Format {
        match self.frames.as_slice() {
            [first, _, ..] => classify(first),
            _ => Format::PlainSingleFrame,
        }
    }
}

/// Split `payload` into chunks of at most `max` bytes on character
/// boundaries.
fn split_chunks(payload: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::with_capacity(payload.len().div_ceil(max));
    let mut rest = payload;
    while !rest.is_empty() {
        let mut end = max.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests;
