//! Scripted stand-in for a fountain-code decoder.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use ciborium::Value;
use qrstream::{FountainDecoder, FountainError, FountainProgress};

/// Fountain decoder that replays a scripted list of outcomes.
///
/// Once the script runs out every further frame reports
/// [`FountainProgress::NeedMore`]. Frames fed to the decoder are recorded in
/// a shared log so a test can inspect them after the decoder has been moved
/// into a session.
#[derive(Debug, Default)]
pub struct ScriptedFountainDecoder {
    script: VecDeque<Result<FountainProgress, FountainError>>,
    fed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFountainDecoder {
    /// Decoder replaying `script` in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Result<FountainProgress, FountainError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fed: Arc::default(),
        }
    }

    /// Decoder that needs `frames` frames and then yields `message`.
    #[must_use]
    pub fn completing_after(frames: usize, message: Vec<u8>) -> Self {
        let waiting = std::iter::repeat_with(|| Ok(FountainProgress::NeedMore))
            .take(frames.saturating_sub(1));
        Self::new(waiting.chain([Ok(FountainProgress::Done(message))]))
    }

    /// Shared record of every frame fed so far.
    #[must_use]
    pub fn fed(&self) -> Arc<Mutex<Vec<String>>> { Arc::clone(&self.fed) }
}

impl FountainDecoder for ScriptedFountainDecoder {
    fn feed(&mut self, frame: &str) -> Result<FountainProgress, FountainError> {
        self.fed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame.to_owned());
        self.script
            .pop_front()
            .unwrap_or(Ok(FountainProgress::NeedMore))
    }
}

/// Encode `bytes` as a CBOR byte string, the message shape a `crypto-psbt`
/// fountain transfer produces.
///
/// # Panics
///
/// Panics if CBOR serialisation into memory fails.
#[must_use]
pub fn cbor_byte_string(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 9);
    ciborium::into_writer(&Value::Bytes(bytes.to_vec()), &mut out).expect("encode CBOR bytes");
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::cbor_byte_string;

    #[rstest]
    #[case(3, &[0x43])]
    #[case(24, &[0x58, 24])]
    #[case(300, &[0x59, 0x01, 0x2c])]
    fn byte_string_headers(#[case] len: usize, #[case] header: &[u8]) {
        let encoded = cbor_byte_string(&vec![7; len]);
        assert_eq!(&encoded[..header.len()], header);
        assert_eq!(encoded.len(), header.len() + len);
    }
}
