//! Receiver-side scan session.
//!
//! A [`ScanSession`] is the object a scanning loop holds for one logical
//! transfer. The first frame picks the wire format and the reassembler;
//! every later frame is routed to that same reassembler. The session has
//! three lifecycle calls: construction, [`ScanSession::feed`] and
//! [`ScanSession::reset`].

pub mod error;

pub use error::{ScanProgress, SessionError, SkipReason};

use std::fmt;

use log::{debug, warn};

use crate::{
    config::{TransferConfig, UnrecognizedPolicy},
    format::{Format, classify},
    reassembly::{
        BoxedFountainDecoder,
        PartStatus,
        Reassembler,
        ReassemblyError,
        SequenceState,
    },
};

/// Builds a fresh fountain decoder for each fountain-coded transfer.
pub type FountainFactory = Box<dyn Fn() -> BoxedFountainDecoder + Send + Sync>;

enum Engine {
    Idle,
    Plain(String),
    Active(Reassembler),
}

/// State of one animated-QR scan.
pub struct ScanSession {
    config: TransferConfig,
    fountain: Option<FountainFactory>,
    engine: Engine,
    poisoned: bool,
}

impl fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSession")
            .field("format", &self.format())
            .field("poisoned", &self.poisoned)
            .field("fountain", &self.fountain.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ScanSession {
    fn default() -> Self { Self::new(TransferConfig::default()) }
}

impl ScanSession {
    /// Create an idle session using `config`.
    #[must_use]
    pub fn new(config: TransferConfig) -> Self {
        Self {
            config,
            fountain: None,
            engine: Engine::Idle,
            poisoned: false,
        }
    }

    /// Enable fountain-coded transfers, building decoders with `factory`.
    #[must_use]
    pub fn with_fountain_decoder<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> BoxedFountainDecoder + Send + Sync + 'static,
    {
        self.fountain = Some(Box::new(factory));
        self
    }

    /// Configuration the session was built with.
    #[must_use]
    pub const fn config(&self) -> &TransferConfig { &self.config }

    /// Feed one scanned frame.
    ///
    /// Malformed, misrouted and undecodable frames are reported as
    /// [`ScanProgress::Skipped`] and leave the transfer untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrstream::session::{ScanProgress, ScanSession};
    /// let mut session = ScanSession::default();
    /// for frame in ["p3of3 d", "p1of3 hello", "p2of3  worl"] {
    ///     session.feed(frame).expect("frame accepted");
    /// }
    /// assert!(session.is_complete());
    /// assert_eq!(session.payload().expect("payload"), "hello world");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Corrupt`] when the frame contradicts the
    /// transfer's established total; the session must then be reset.
    /// Returns [`SessionError::Poisoned`] for any frame fed after that, and
    /// [`SessionError::FountainUnavailable`] when a fountain transfer starts
    /// without a configured decoder.
    pub fn feed(&mut self, frame: &str) -> Result<ScanProgress, SessionError> {
        if self.poisoned {
            return Err(SessionError::Poisoned);
        }
        if self.is_complete() {
            return Ok(ScanProgress::Duplicate);
        }

        match &mut self.engine {
            Engine::Idle => self.start(frame),
            Engine::Plain(_) => Ok(ScanProgress::Duplicate),
            Engine::Active(reassembler) => {
                let session = reassembler.format();
                let found = classify(frame);
                if !session.accepts(found) {
                    debug!("skipping {found} frame in {session} session");
                    return Ok(ScanProgress::Skipped(SkipReason::FormatMismatch {
                        session,
                        frame: found,
                    }));
                }
                deliver(reassembler, frame).map_err(|err| {
                    warn!("discarding transfer after integrity violation: {err}");
                    self.poisoned = true;
                    SessionError::Corrupt(err)
                })
            }
        }
    }

    fn start(&mut self, frame: &str) -> Result<ScanProgress, SessionError> {
        let mut reassembler = match classify(frame) {
            Format::FountainCoded => {
                let factory = self
                    .fountain
                    .as_ref()
                    .ok_or(SessionError::FountainUnavailable)?;
                Reassembler::fountain(factory())
            }
            Format::PrefixedMultiPart(encoding) => Reassembler::multipart(
                encoding,
                &self.config.document_key,
                self.config.max_parts,
            ),
            Format::Unrecognized | Format::PlainSingleFrame => {
                return Ok(self.start_plain(frame));
            }
        };

        let progress = deliver(&mut reassembler, frame).map_err(SessionError::Corrupt)?;
        if matches!(progress, ScanProgress::Skipped(_)) {
            return Ok(progress);
        }
        debug!("started {} session", reassembler.format());
        self.engine = Engine::Active(reassembler);
        Ok(progress)
    }

    fn start_plain(&mut self, frame: &str) -> ScanProgress {
        match self.config.unrecognized {
            UnrecognizedPolicy::TreatAsPlain => {
                debug!("treating headerless frame as a complete payload");
                self.engine = Engine::Plain(frame.to_owned());
                ScanProgress::Complete
            }
            UnrecognizedPolicy::Reject => {
                debug!("skipping unrecognized frame");
                ScanProgress::Skipped(SkipReason::Unrecognized)
            }
        }
    }

    /// Discard the transfer, returning the session to its idle state.
    pub fn reset(&mut self) {
        self.engine = Engine::Idle;
        self.poisoned = false;
    }

    /// Whether an integrity violation has corrupted the session.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool { self.poisoned }

    /// Wire format chosen by the first accepted frame.
    #[must_use]
    pub const fn format(&self) -> Option<Format> {
        match &self.engine {
            Engine::Idle => None,
            Engine::Plain(_) => Some(Format::PlainSingleFrame),
            Engine::Active(reassembler) => Some(reassembler.format()),
        }
    }

    /// Whether the transfer is structurally complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.engine {
            Engine::Idle => false,
            Engine::Plain(_) => true,
            Engine::Active(reassembler) => reassembler.is_complete(),
        }
    }

    /// Whether the payload can be trusted downstream. Only JSON documents
    /// can be complete yet invalid.
    #[must_use]
    pub fn is_semantically_valid(&self) -> bool {
        match &self.engine {
            Engine::Idle => false,
            Engine::Plain(_) => true,
            Engine::Active(reassembler) => reassembler.is_semantically_valid(),
        }
    }

    /// Parts received and expected so far.
    #[must_use]
    pub fn progress(&self) -> (usize, Option<u32>) {
        match &self.engine {
            Engine::Idle => (0, None),
            Engine::Plain(_) => (1, Some(1)),
            Engine::Active(reassembler) => reassembler.progress(),
        }
    }

    /// Assembled payload.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Reassembly`] wrapping
    /// [`ReassemblyError::NotComplete`] until the transfer completes.
    pub fn payload(&self) -> Result<String, SessionError> {
        match &self.engine {
            Engine::Idle => Err(ReassemblyError::NotComplete {
                received: 0,
                expected: 0,
            }
            .into()),
            Engine::Plain(text) => Ok(text.clone()),
            Engine::Active(reassembler) => Ok(reassembler.assembled_payload()?),
        }
    }

    /// Descriptor extracted from a valid JSON document transfer.
    #[must_use]
    pub fn descriptor(&self) -> Option<String> {
        match &self.engine {
            Engine::Active(Reassembler::Document(document)) => document.descriptor(),
            _ => None,
        }
    }

    /// Snapshot of completion and payload.
    #[must_use]
    pub fn sequence_state(&self) -> SequenceState {
        SequenceState {
            done: self.is_complete(),
            payload: self.payload().ok(),
        }
    }
}

/// Feed `frame` to `reassembler`, turning non-fatal errors into skips.
fn deliver(reassembler: &mut Reassembler, frame: &str) -> Result<ScanProgress, ReassemblyError> {
    match reassembler.receive_part(frame) {
        Ok(PartStatus::Incomplete) => {
            let (received, expected) = reassembler.progress();
            Ok(ScanProgress::Collecting { received, expected })
        }
        Ok(PartStatus::Duplicate) => Ok(ScanProgress::Duplicate),
        Ok(PartStatus::Complete) => {
            if reassembler.is_semantically_valid() {
                debug!("{} transfer complete", reassembler.format());
            } else {
                warn!("transfer complete but the document failed validation");
            }
            Ok(ScanProgress::Complete)
        }
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            debug!("skipping frame: {err}");
            Ok(ScanProgress::Skipped(SkipReason::Rejected(err)))
        }
    }
}
