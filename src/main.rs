//! `qrstream` binary: prints animated-QR frames for a payload and
//! reassembles scanned frames.
//!
//! Frames travel as lines of text; rendering and scanning the QR symbols is
//! left to other tools.

mod cli;

use std::{
    fs,
    io::{self, Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::ExitCode,
    thread,
};

use clap::Parser;
use cli::{Cli, Command, DecodeArgs, EncodeArgs};
use log::{error, info, warn};
use qrstream::{
    ConfigError,
    EncodeError,
    Format,
    FragmentEncoder,
    ScanProgress,
    ScanSession,
    SessionError,
    SkipReason,
    TransferConfig,
    UnrecognizedPolicy,
};
use thiserror::Error;

/// Errors reported by the binary.
#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("fragment size must be at least 1")]
    ZeroFragmentSize,
    #[error("payload is not UTF-8 text; pass --binary to base64-encode it")]
    NotUtf8,
    #[error("payload contains line breaks; pass --binary to base64-encode it")]
    LineBreak,
    #[error("line {line} carries no frame header inside a multi-part transfer")]
    Headerless { line: usize },
    #[error("transfer incomplete: {received} of {expected} parts received")]
    Incomplete { received: usize, expected: u32 },
    #[error("transfer incomplete: input ended before the payload was decoded")]
    Unfinished,
}

fn main() -> ExitCode {
    // Forward `log` records from the library to a tracing subscriber.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match cli.config.as_deref() {
        Some(path) => TransferConfig::load(path)?,
        None => TransferConfig::default(),
    };
    match cli.command {
        Command::Encode(args) => {
            let _span = tracing::info_span!("encode", input = ?args.input).entered();
            encode(&args, &config)
        }
        Command::Decode(args) => {
            let _span = tracing::info_span!("decode", strict = args.strict).entered();
            decode(&args, config)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => fs::read(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(CliError::Stdin)?;
            Ok(buf)
        }
    }
}

fn encode(args: &EncodeArgs, config: &TransferConfig) -> Result<(), CliError> {
    let fragment_size = match args.fragment_size {
        Some(size) => NonZeroUsize::new(size).ok_or(CliError::ZeroFragmentSize)?,
        None => config.fragment_size,
    };
    let input = read_input(args.input.as_deref())?;
    let mut encoder = build_encoder(input, args.binary, fragment_size)?;
    info!("payload split into {} frames", encoder.len());

    let mut out = io::stdout().lock();
    for _ in 0..args.cycles {
        for _ in 0..encoder.len() {
            writeln!(out, "{}", encoder.next_frame())?;
            if args.animate {
                out.flush()?;
                thread::sleep(config.frame_interval);
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Build the encoder for `input`, refusing text that would not survive
/// line-based framing.
fn build_encoder(
    input: Vec<u8>,
    binary: bool,
    fragment_size: NonZeroUsize,
) -> Result<FragmentEncoder, CliError> {
    if binary {
        return Ok(FragmentEncoder::for_binary(&input, fragment_size)?);
    }
    let text = String::from_utf8(input).map_err(|_| CliError::NotUtf8)?;
    let body = text.strip_suffix('\n').unwrap_or(&text);
    if body.contains(['\n', '\r']) {
        return Err(CliError::LineBreak);
    }
    Ok(FragmentEncoder::new(body, fragment_size)?)
}

fn decode(args: &DecodeArgs, mut config: TransferConfig) -> Result<(), CliError> {
    if args.strict {
        config.unrecognized = UnrecognizedPolicy::Reject;
    }
    let input = read_input(args.input.as_deref())?;
    let payload = reassemble(&String::from_utf8_lossy(&input), config)?;
    writeln!(io::stdout().lock(), "{payload}")?;
    Ok(())
}

/// Feed `text` to a fresh session one line at a time and return the
/// descriptor or payload.
fn reassemble(text: &str, config: TransferConfig) -> Result<String, CliError> {
    let mut session = ScanSession::new(config);
    for (number, frame) in text.lines().enumerate() {
        let line = number + 1;
        if frame.trim().is_empty() {
            continue;
        }
        match session.feed(frame) {
            Ok(ScanProgress::Complete) => break,
            Ok(ScanProgress::Skipped(SkipReason::FormatMismatch {
                frame: Format::Unrecognized,
                ..
            })) => return Err(CliError::Headerless { line }),
            Ok(ScanProgress::Skipped(reason)) => warn!("skipping line {line}: {reason:?}"),
            Ok(_) => {}
            Err(SessionError::FountainUnavailable) => {
                warn!("skipping line {line}: {}", SessionError::FountainUnavailable);
            }
            Err(err) => return Err(err.into()),
        }
    }

    if !session.is_complete() {
        return Err(match session.progress() {
            (received, Some(expected)) => CliError::Incomplete { received, expected },
            (_, None) => CliError::Unfinished,
        });
    }
    if !session.is_semantically_valid() {
        warn!("payload is complete but failed document validation");
    }

    Ok(match session.descriptor() {
        Some(descriptor) => descriptor,
        None => session.payload()?,
    })
}
