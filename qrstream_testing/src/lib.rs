//! Test helpers for the `qrstream` crate.
//!
//! Provides a serialised log capture fixture, helpers that reorder and repeat
//! frame sequences the way a handheld scanner delivers them, and a scripted
//! fountain decoder for exercising fountain-coded sessions without a real
//! UR implementation.
//!
//! ```rust
//! use std::num::NonZeroUsize;
//!
//! use qrstream::{FragmentEncoder, ScanSession};
//! use qrstream_testing::scanner_order;
//!
//! let size = NonZeroUsize::new(5).expect("non-zero");
//! let encoder = FragmentEncoder::new("hello world", size).expect("encode");
//! let mut session = ScanSession::default();
//! for frame in scanner_order(encoder.frames(), 7) {
//!     session.feed(&frame).expect("frame accepted");
//! }
//! assert_eq!(session.payload().expect("complete"), "hello world");
//! ```

pub mod fountain;
pub mod frames;
pub mod logging;

pub use fountain::{ScriptedFountainDecoder, cbor_byte_string};
pub use frames::{reversed, rotated, scanner_order, with_duplicates};
pub use logging::{LoggerHandle, logger};

/// Result type for fallible tests and helpers.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
