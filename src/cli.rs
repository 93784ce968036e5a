//! Command line interface for the `qrstream` binary.
//!
//! Kept free of library types so `build.rs` can include it to render the
//! man page.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line arguments for the `qrstream` binary.
#[derive(Debug, Parser)]
#[command(
    name = "qrstream",
    version,
    about = "Split payloads into animated QR text frames and reassemble them"
)]
pub struct Cli {
    /// JSON transfer configuration file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `qrstream` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the frames for a payload, one per line.
    Encode(EncodeArgs),
    /// Reassemble scanned frames read one per line.
    Decode(DecodeArgs),
}

/// Arguments for `qrstream encode`.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Read the payload from FILE instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Base64-encode the raw input bytes before fragmenting.
    #[arg(short, long)]
    pub binary: bool,
    /// Payload bytes per frame; overrides the configuration.
    #[arg(short = 's', long, value_name = "BYTES")]
    pub fragment_size: Option<usize>,
    /// Number of full passes over the frames to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub cycles: u32,
    /// Pause for the configured frame interval between frames.
    #[arg(short, long)]
    pub animate: bool,
}

/// Arguments for `qrstream decode`.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Read frames from FILE instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Skip headerless frames instead of treating them as a whole payload.
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use rstest::rstest;

    use super::{Cli, Command};

    #[test]
    fn parses_encode_options() {
        let cli = Cli::parse_from([
            "qrstream",
            "encode",
            "--input",
            "psbt.txt",
            "--fragment-size",
            "40",
            "--cycles",
            "3",
            "--animate",
        ]);
        let Command::Encode(args) = cli.command else {
            panic!("expected encode subcommand");
        };
        assert_eq!(args.input.as_deref(), Some(Path::new("psbt.txt")));
        assert_eq!(args.fragment_size, Some(40));
        assert_eq!(args.cycles, 3);
        assert!(args.animate);
        assert!(!args.binary);
    }

    #[test]
    fn encode_defaults_to_one_cycle() {
        let cli = Cli::parse_from(["qrstream", "encode"]);
        let Command::Encode(args) = cli.command else {
            panic!("expected encode subcommand");
        };
        assert_eq!(args.cycles, 1);
        assert_eq!(args.fragment_size, None);
    }

    #[rstest]
    #[case::before(&["qrstream", "--config", "qr.json", "decode", "--strict"])]
    #[case::after(&["qrstream", "decode", "--strict", "--config", "qr.json"])]
    fn config_is_accepted_anywhere(#[case] argv: &[&str]) {
        let cli = Cli::parse_from(argv);
        assert_eq!(cli.config.as_deref(), Some(Path::new("qr.json")));
        let Command::Decode(args) = cli.command else {
            panic!("expected decode subcommand");
        };
        assert!(args.strict);
        assert_eq!(args.input, None);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["qrstream"]).is_err());
    }
}
