//! Tests for Display implementations on error types.

use qrstream::{
    ConfigError,
    EncodeError,
    FountainError,
    HeaderError,
    ReassemblyError,
    SessionError,
    TransferConfig,
};

#[test]
fn header_error_messages() {
    assert_eq!(HeaderError::Missing.to_string(), "frame does not carry a multi-part header");
    assert_eq!(
        HeaderError::IndexOutOfRange { index: 4, total: 3 }.to_string(),
        "part index 4 out of range for total 3"
    );
}

#[test]
fn reassembly_error_messages() {
    assert_eq!(
        ReassemblyError::SequenceIntegrity {
            expected: 3,
            found: 4,
        }
        .to_string(),
        "sequence total changed unexpectedly: expected 3, found 4"
    );
    assert_eq!(
        ReassemblyError::NotComplete {
            received: 1,
            expected: 2,
        }
        .to_string(),
        "transfer incomplete: 1 of 2 parts received"
    );
    assert_eq!(
        ReassemblyError::from(FountainError::Rejected("bad crc".into())).to_string(),
        "fountain decode failed: frame rejected: bad crc"
    );
}

#[test]
fn session_error_messages() {
    let corrupt = SessionError::Corrupt(ReassemblyError::SequenceIntegrity {
        expected: 2,
        found: 5,
    });
    assert_eq!(
        corrupt.to_string(),
        "transfer corrupted, restart the scan: sequence total changed unexpectedly: expected 2, \
         found 5"
    );
    assert_eq!(
        SessionError::from(ReassemblyError::NotComplete {
            received: 0,
            expected: 0,
        })
        .to_string(),
        "transfer incomplete: 0 of 0 parts received"
    );
}

#[test]
fn encode_and_config_error_messages() {
    assert_eq!(EncodeError::EmptyPayload.to_string(), "cannot encode an empty payload");
    assert_eq!(
        ConfigError::EmptyDocumentKey.to_string(),
        "document key must not be empty"
    );
    let parse = TransferConfig::from_json_str("{").expect_err("truncated JSON");
    assert!(parse.to_string().starts_with("invalid config: "));
}
