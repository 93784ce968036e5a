//! End-to-end runs of the `qrstream` binary over stdin and stdout.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use rstest::rstest;

fn qrstream(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_qrstream"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn qrstream");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("wait for qrstream")
}

fn stdout(output: &Output) -> &str { std::str::from_utf8(&output.stdout).expect("utf-8 stdout") }

fn stderr(output: &Output) -> &str { std::str::from_utf8(&output.stderr).expect("utf-8 stderr") }

#[rstest]
#[case::fragmented(&["encode", "-s", "5"], "hello world")]
#[case::single_frame(&["encode"], "hello world\n")]
#[case::repeated_cycles(&["encode", "-s", "3", "-n", "2"], "abcdefgh")]
fn encode_then_decode_restores_text(#[case] args: &[&str], #[case] payload: &str) {
    let frames = qrstream(args, payload.as_bytes());
    assert!(frames.status.success(), "{}", stderr(&frames));

    let decoded = qrstream(&["decode"], &frames.stdout);
    assert!(decoded.status.success(), "{}", stderr(&decoded));
    assert_eq!(stdout(&decoded), format!("{}\n", payload.trim_end_matches('\n')));
}

#[rstest]
#[case::inner_newline(b"aaaa\nbbbb".as_slice())]
#[case::two_lines(b"line one\nline two".as_slice())]
fn encode_refuses_text_with_line_breaks(#[case] payload: &[u8]) {
    let output = qrstream(&["encode", "-s", "5"], payload);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("--binary"));
}

#[test]
fn binary_mode_carries_line_breaks_as_base64() {
    let frames = qrstream(&["encode", "--binary", "-s", "4"], b"aaaa\nbbbb");
    assert!(frames.status.success(), "{}", stderr(&frames));
    assert_eq!(stdout(&frames), "p1of3 YWFh\np2of3 YQpi\np3of3 YmJi\n");

    let decoded = qrstream(&["decode"], &frames.stdout);
    assert!(decoded.status.success(), "{}", stderr(&decoded));
    assert_eq!(stdout(&decoded), "YWFhYQpiYmJi\n");
}

#[test]
fn decode_fails_on_headerless_line_mid_transfer() {
    let output = qrstream(&["decode"], b"p1of2 aaaa\n\np2of2 bbbb\nspill\n");
    assert!(output.status.success(), "completion stops the scan");

    let output = qrstream(&["decode"], b"p1of2 aaaa\nspill\np2of2 bbbb\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("line 2 carries no frame header"));
}

#[rstest]
#[case::first("UR:CRYPTO-PSBT/1-2/lpad\np1of2 AAAA\np2of2 BBBB\n")]
#[case::middle("p1of2 AAAA\nUR:CRYPTO-PSBT/1-2/lpad\np2of2 BBBB\n")]
fn decode_skips_stray_fountain_frame(#[case] input: &str) {
    let output = qrstream(&["decode"], input.as_bytes());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "AAAABBBB\n");
}

#[test]
fn strict_decode_ignores_plain_text() {
    let plain = qrstream(&["decode"], b"just text\n");
    assert!(plain.status.success(), "{}", stderr(&plain));
    assert_eq!(stdout(&plain), "just text\n");

    let strict = qrstream(&["decode", "--strict"], b"just text\n");
    assert!(!strict.status.success());
    assert!(stderr(&strict).contains("input ended before the payload was decoded"));
}

#[test]
fn decode_reports_missing_parts() {
    let output = qrstream(&["decode"], b"p1of3 AAAA\np3of3 CCCC\n");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("2 of 3 parts received"));
}
