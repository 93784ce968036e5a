//! Fountain-coded transfers through a scan session.

use std::sync::{Arc, Mutex};

use qrstream::{
    FountainError,
    FountainProgress,
    ReassemblyError,
    ScanProgress,
    ScanSession,
    SessionError,
    SkipReason,
};
use qrstream_testing::{ScriptedFountainDecoder, TestResult, cbor_byte_string};

#[test]
fn session_normalises_fountain_output_to_base64() -> TestResult {
    let mut session = ScanSession::default().with_fountain_decoder(|| {
        Box::new(ScriptedFountainDecoder::completing_after(
            3,
            cbor_byte_string(b"psbt\xff"),
        ))
    });

    for frame in ["UR:CRYPTO-PSBT/1-3/aaaa", "ur:crypto-psbt/7-3/bbbb"] {
        assert_eq!(
            session.feed(frame)?,
            ScanProgress::Collecting {
                received: 0,
                expected: None,
            }
        );
    }
    assert_eq!(session.feed("UR:CRYPTO-PSBT/9-3/cccc")?, ScanProgress::Complete);
    assert_eq!(session.payload()?, "cHNidP8=");
    assert!(session.is_semantically_valid());
    Ok(())
}

#[test]
fn decoder_failures_are_skipped() -> TestResult {
    let fed = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&fed);
    let mut session = ScanSession::default().with_fountain_decoder(move || {
        let decoder = ScriptedFountainDecoder::new([
            Ok(FountainProgress::NeedMore),
            Err(FountainError::Rejected("crc mismatch".into())),
            Ok(FountainProgress::Done(cbor_byte_string(&[1, 2, 3]))),
        ]);
        *slot.lock().expect("slot lock") = Some(decoder.fed());
        Box::new(decoder)
    });

    session.feed("UR:CRYPTO-PSBT/1-2/aaaa")?;
    assert_eq!(
        session.feed("UR:CRYPTO-PSBT/2-2/zzzz")?,
        ScanProgress::Skipped(SkipReason::Rejected(ReassemblyError::Decode(
            FountainError::Rejected("crc mismatch".into())
        )))
    );
    assert_eq!(session.feed("UR:CRYPTO-PSBT/2-2/bbbb")?, ScanProgress::Complete);
    assert_eq!(session.payload()?, "AQID");

    let log = fed.lock().expect("fed lock").clone().ok_or("decoder never built")?;
    assert_eq!(log.lock().expect("log lock").len(), 3);
    Ok(())
}

#[test]
fn fountain_session_without_decoder_can_fall_back() -> TestResult {
    let mut session = ScanSession::default();
    assert_eq!(
        session.feed("UR:CRYPTO-PSBT/1-2/aaaa"),
        Err(SessionError::FountainUnavailable)
    );
    assert_eq!(session.feed("p1of1 AAAA")?, ScanProgress::Complete);
    Ok(())
}
