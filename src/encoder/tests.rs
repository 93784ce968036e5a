//! Tests for frame construction and cyclic serving.

use std::num::NonZeroUsize;

use rstest::rstest;

use super::{EncodeError, FragmentEncoder, split_chunks};
use crate::format::{Format, PartEncoding};

fn size(bytes: usize) -> NonZeroUsize { NonZeroUsize::new(bytes).expect("non-zero") }

#[test]
fn hello_world_splits_into_three_frames() {
    let encoder = FragmentEncoder::new("hello world", size(5)).expect("encode");
    assert_eq!(encoder.frames(), ["p1of3 hello", "p2of3  worl", "p3of3 d"]);
    assert_eq!(encoder.len(), 3);
    assert!(encoder.is_fragmented());
}

#[rstest]
#[case::fits("just one frame", 65)]
#[case::exact("12345", 5)]
fn small_payload_is_a_single_plain_frame(#[case] payload: &str, #[case] bytes: usize) {
    let encoder = FragmentEncoder::new(payload, size(bytes)).expect("encode");
    assert_eq!(encoder.frames(), [payload]);
    assert!(!encoder.is_fragmented());
    assert_eq!(encoder.format(), Format::PlainSingleFrame);
}

#[test]
fn one_trailing_newline_is_stripped() {
    let encoder = FragmentEncoder::new("cHNidP8=\n", size(65)).expect("encode");
    assert_eq!(encoder.frames(), ["cHNidP8="]);

    let encoder = FragmentEncoder::new("ab\n\n", size(65)).expect("encode");
    assert_eq!(encoder.frames(), ["ab\n"]);
}

#[rstest]
#[case::empty("")]
#[case::only_newline("\n")]
fn empty_payload_is_rejected(#[case] payload: &str) {
    assert_eq!(
        FragmentEncoder::new(payload, size(5)),
        Err(EncodeError::EmptyPayload)
    );
}

#[test]
fn next_frame_cycles_and_flags_a_full_pass() {
    let mut encoder = FragmentEncoder::new("abcdef", size(2)).expect("encode");
    assert!(!encoder.has_completed_a_cycle());
    assert_eq!(encoder.next_frame(), "p1of3 ab");
    assert_eq!(encoder.next_frame(), "p2of3 cd");
    assert!(!encoder.has_completed_a_cycle());
    assert_eq!(encoder.next_frame(), "p3of3 ef");
    assert!(encoder.has_completed_a_cycle());
    assert_eq!(encoder.next_frame(), "p1of3 ab");
    assert!(encoder.has_completed_a_cycle());
}

#[test]
fn single_frame_completes_a_cycle_immediately() {
    let mut encoder = FragmentEncoder::with_default_size("tiny").expect("encode");
    assert_eq!(encoder.next_frame(), "tiny");
    assert!(encoder.has_completed_a_cycle());
    assert_eq!(encoder.next_frame(), "tiny");
}

#[test]
fn rewind_restarts_the_pass() {
    let mut encoder = FragmentEncoder::new("abcd", size(2)).expect("encode");
    encoder.next_frame();
    encoder.next_frame();
    assert!(encoder.has_completed_a_cycle());
    encoder.rewind();
    assert!(!encoder.has_completed_a_cycle());
    assert_eq!(encoder.next_frame(), "p1of2 ab");
}

#[test]
fn default_size_is_sixty_five_bytes() {
    let payload = "A".repeat(130);
    let encoder = FragmentEncoder::with_default_size(&payload).expect("encode");
    assert_eq!(encoder.len(), 2);
    assert_eq!(encoder.frame(0).map(str::len), Some("p1of2 ".len() + 65));
    assert_eq!(encoder.frame(2), None);

    let encoder = FragmentEncoder::with_default_size(&"A".repeat(131)).expect("encode");
    assert_eq!(encoder.len(), 3);
    assert_eq!(encoder.frame(2), Some("p3of3 A"));
}

#[test]
fn binary_payload_is_base64_encoded_first() {
    let encoder = FragmentEncoder::for_binary(b"\x00\x01\x02\xff", size(4)).expect("encode");
    assert_eq!(encoder.frames(), ["p1of2 AAEC", "p2of2 /w=="]);
    assert_eq!(
        encoder.format(),
        Format::PrefixedMultiPart(PartEncoding::Base64)
    );
    assert_eq!(
        FragmentEncoder::for_binary(&[], size(4)),
        Err(EncodeError::EmptyPayload)
    );
}

#[test]
fn document_frames_report_document_format() {
    let encoder =
        FragmentEncoder::new("{\"descriptor\": \"wpkh(k)\"}", size(10)).expect("encode");
    assert_eq!(
        encoder.format(),
        Format::PrefixedMultiPart(PartEncoding::Document)
    );
}

#[rstest]
#[case::ascii("abcdef", 4, vec!["abcd", "ef"])]
#[case::two_byte_boundary("aéb", 2, vec!["a", "é", "b"])]
#[case::wide_char_alone("€x", 1, vec!["€", "x"])]
#[case::exact_fit("éé", 2, vec!["é", "é"])]
fn chunks_respect_char_boundaries(
    #[case] payload: &str,
    #[case] max: usize,
    #[case] expected: Vec<&str>,
) {
    assert_eq!(split_chunks(payload, max), expected);
}
