//! SpecSteg CLI - Command-line interface for spectral audio steganography
//!
//! This binary hides payload files inside WAV carriers, recovers them, and
//! compares recovered payloads against their originals.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use specsteg_cli::commands;
use specsteg_cli::options::CodecArgs;

/// SpecSteg - Hide bytes in the spectrum of synthesized audio
#[derive(Parser)]
#[command(name = "specsteg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a payload file inside a WAV carrier
    Encode {
        /// Payload file
        input: String,

        /// Carrier file (default: input path with .wav appended)
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        codec: CodecArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Recover a payload file from a WAV carrier
    Decode {
        /// Carrier file
        input: String,

        /// Payload file (default: input path without its extension)
        #[arg(short, long)]
        output: Option<String>,

        /// Expected payload length in bytes (raw framing only)
        #[arg(short, long)]
        length: Option<usize>,

        #[command(flatten)]
        codec: CodecArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compare a recovered payload against the original
    Compare {
        /// Original file
        reference: String,

        /// Recovered file
        candidate: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the effective codec configuration
    Config {
        #[command(flatten)]
        codec: CodecArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            codec,
            json,
        } => commands::encode::run(&input, output.as_deref(), &codec, json),
        Commands::Decode {
            input,
            output,
            length,
            codec,
            json,
        } => commands::decode::run(&input, output.as_deref(), length, &codec, json),
        Commands::Compare {
            reference,
            candidate,
            json,
        } => commands::compare::run(&reference, &candidate, json),
        Commands::Config { codec, json } => commands::config::run(&codec, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
