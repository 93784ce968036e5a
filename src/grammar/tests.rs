//! Tests for the frame recognisers and header parsing.

use rstest::rstest;

use super::*;

#[rstest]
#[case("UR:CRYPTO-PSBT/1-3/lpadaxcsencylobemohsgmoyadtaadegwp", true)]
#[case("ur:crypto-psbt/3-7/abc", true)]
#[case("Ur:Crypto-Psbt/", true)]
#[case("UR:CRYPTO-PSB", false)]
#[case("UR:BYTES/1-3/abc", false)]
#[case(" UR:CRYPTO-PSBT/1-3/abc", false)]
#[case("", false)]
fn recognises_fountain_prefix(#[case] frame: &str, #[case] expected: bool) {
    assert_eq!(is_fountain_coded(frame), expected);
}

#[rstest]
#[case("p1of3 aGVsbG8=", true)]
#[case("P12OF40 payload", true)]
#[case("p1of2\tpayload", true)]
#[case("p1of2 ", true)]
#[case("p1of2", false)]
#[case("p1of2x payload", false)]
#[case("pof2 payload", false)]
#[case("p1of payload", false)]
#[case("xp1of2 payload", false)]
#[case("plain text, no header", false)]
fn recognises_multipart_header(#[case] frame: &str, #[case] expected: bool) {
    assert_eq!(is_prefixed_multipart(frame), expected);
}

#[rstest]
#[case("p1of3 aGVsbG8=", true)]
#[case("p2of3 abc+/xyz==", true)]
#[case("p1of3 hello", true)]
#[case("p2of3  worl", false)]
#[case("p1of2 {\"descriptor\":\"wpkh\"}", false)]
#[case("p1of2 ", false)]
#[case("aGVsbG8=", false)]
fn recognises_base64_fragments(#[case] frame: &str, #[case] expected: bool) {
    assert_eq!(is_prefixed_multipart_base64(frame), expected);
}

#[test]
fn parses_header_numbers() {
    let header = parse_multipart_header("p7of12 abc").expect("valid header");
    assert_eq!(header.index(), PartIndex::new(7));
    assert_eq!(header.total(), 12);
}

#[rstest]
#[case("no header here", HeaderError::Missing)]
#[case("p99999999999of2 abc", HeaderError::Overflow)]
#[case("p1of0 abc", HeaderError::ZeroTotal)]
#[case("p0of3 abc", HeaderError::IndexOutOfRange { index: 0, total: 3 })]
#[case("p4of3 abc", HeaderError::IndexOutOfRange { index: 4, total: 3 })]
fn rejects_unusable_headers(#[case] frame: &str, #[case] expected: HeaderError) {
    assert_eq!(parse_multipart_header(frame), Err(expected));
}

#[rstest]
#[case("p1of3 hello", "hello")]
#[case("p2of3  worl", " worl")]
#[case("p1of2 {\"a\": 1, \"b\": 2}", "{\"a\": 1, \"b\": 2}")]
#[case("p1of1 ", "")]
#[case("just one frame", "just one frame")]
fn strips_header_but_keeps_fragment_whitespace(#[case] frame: &str, #[case] expected: &str) {
    assert_eq!(strip_multipart_header(frame), expected);
}

#[test]
fn split_returns_header_and_fragment() {
    let (header, fragment) = split_multipart("p3of3 d").expect("valid frame");
    assert_eq!(header.index(), PartIndex::new(3));
    assert_eq!(header.total(), 3);
    assert_eq!(fragment, "d");
}

#[test]
fn header_without_header_is_single() {
    let header = PartHeader::single();
    assert_eq!(header.index(), PartIndex::first());
    assert!(header.is_single());
}

#[test]
fn part_index_maps_to_zero_based_slot() {
    assert_eq!(PartIndex::new(1).slot(), 0);
    assert_eq!(PartIndex::new(5).slot(), 4);
    assert_eq!(PartIndex::new(0).slot(), 0);
}

#[test]
fn non_ascii_input_never_panics() {
    for frame in ["ü", "pü", "p1ofü", "p1of2ü", "p1of2 ü"] {
        let _ = is_prefixed_multipart(frame);
        let _ = parse_multipart_header(frame);
        let _ = strip_multipart_header(frame);
    }
    assert_eq!(strip_multipart_header("p1of2 ü"), "ü");
}
