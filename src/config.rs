//! Transfer configuration.
//!
//! [`TransferConfig`] gathers the knobs shared by the sender and the
//! receiver: fragment size and display cadence for the encoder, the part
//! limit and document key for reassembly, and the policy applied to
//! headerless first frames. It is loaded from JSON so both ends of a
//! transfer can share one file.

use std::{
    fs,
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reassembly::{DEFAULT_DOCUMENT_KEY, DEFAULT_MAX_PARTS};

/// Default number of payload bytes carried by one frame.
pub const DEFAULT_FRAGMENT_SIZE: NonZeroUsize = match NonZeroUsize::new(65) {
    Some(size) => size,
    None => panic!("default fragment size must be non-zero"),
};

/// Default delay between animated frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(300);

/// What a scan session does with a first frame that carries no known header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedPolicy {
    /// Accept the frame as a complete single-frame payload.
    #[default]
    TreatAsPlain,
    /// Skip the frame and keep waiting for a recognised one.
    Reject,
}

/// Settings for encoding and reassembling animated-QR transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransferConfig {
    /// Maximum payload bytes per frame.
    pub fragment_size: NonZeroUsize,
    /// Delay between frames of an animation, in milliseconds on the wire.
    #[serde(with = "millis")]
    pub frame_interval: Duration,
    /// Largest part count a transfer may declare.
    pub max_parts: NonZeroU32,
    /// Key a JSON document must contain to be trusted.
    pub document_key: String,
    /// Handling of headerless first frames.
    pub unrecognized: UnrecognizedPolicy,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            max_parts: DEFAULT_MAX_PARTS,
            document_key: DEFAULT_DOCUMENT_KEY.to_owned(),
            unrecognized: UnrecognizedPolicy::default(),
        }
    }
}

impl TransferConfig {
    /// Parse a configuration from JSON text. Missing fields take their
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrstream::config::{TransferConfig, UnrecognizedPolicy};
    /// let config = TransferConfig::from_json_str(r#"{"fragment_size": 100, "unrecognized": "reject"}"#)
    ///     .expect("valid config");
    /// assert_eq!(config.fragment_size.get(), 100);
    /// assert_eq!(config.unrecognized, UnrecognizedPolicy::Reject);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown fields or a
    /// zero size, and [`ConfigError::EmptyDocumentKey`] for a blank key.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`TransferConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.document_key.trim().is_empty() {
            return Err(ConfigError::EmptyDocumentKey);
        }
        Ok(())
    }
}

/// Errors raised while loading a [`TransferConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not a valid `TransferConfig`.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// `document_key` was empty.
    #[error("document key must not be empty")]
    EmptyDocumentKey,
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, ser::Error};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis())
            .map_err(|_| S::Error::custom("frame interval exceeds u64 milliseconds"))?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
