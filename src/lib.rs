#![doc(html_root_url = "https://docs.rs/qrstream/latest")]
//! Public API for the `qrstream` library.
//!
//! This crate splits payloads that are too large for one QR code into an
//! animated sequence of text frames, and reassembles scanned frames back
//! into the payload. Three wire formats are understood: fixed-order
//! `p<index>of<total>` frames carrying base64 or a JSON document,
//! fountain-coded `UR:CRYPTO-PSBT/` frames, and plain headerless frames.

pub mod config;
pub mod encoder;
pub mod format;
pub mod grammar;
pub mod reassembly;
pub mod session;

pub use config::{ConfigError, TransferConfig, UnrecognizedPolicy};
pub use encoder::{EncodeError, FragmentEncoder};
pub use format::{Format, PartEncoding, classify};
pub use grammar::{HeaderError, PartHeader, PartIndex};
pub use reassembly::{
    Base64Reassembler,
    DocumentReassembler,
    DocumentValidity,
    FountainDecoder,
    FountainError,
    FountainProgress,
    FountainReassembler,
    PartStatus,
    Reassembler,
    ReassemblyError,
    SequenceState,
};
pub use session::{FountainFactory, ScanProgress, ScanSession, SessionError, SkipReason};
