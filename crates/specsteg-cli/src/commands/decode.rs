//! Decode command implementation
//!
//! Recovers a payload file from a WAV carrier.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use specsteg_codec::{decode_file, DecodeReport};

use super::json_output::emit;
use crate::options::CodecArgs;
use crate::progress::ConsoleProgress;

/// Run the decode command
///
/// # Arguments
/// * `input` - Carrier file
/// * `output` - Payload file (default: input path without its extension)
/// * `length` - Expected payload length for raw framing
/// * `codec` - Codec flags
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    output: Option<&str>,
    length: Option<usize>,
    codec: &CodecArgs,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        emit(decode(input, output, length, codec, true))
    } else {
        run_human(input, output, length, codec)
    }
}

fn decode(
    input: &str,
    output: Option<&str>,
    length: Option<usize>,
    codec: &CodecArgs,
    quiet: bool,
) -> Result<DecodeReport> {
    let config = codec.resolve()?;
    let mut progress = ConsoleProgress::new(quiet);
    decode_file(
        Path::new(input),
        output.map(Path::new),
        &config,
        length,
        &mut progress,
    )
    .with_context(|| format!("Failed to decode {}", input))
}

fn run_human(
    input: &str,
    output: Option<&str>,
    length: Option<usize>,
    codec: &CodecArgs,
) -> Result<ExitCode> {
    println!("{} {}", "Decoding:".cyan().bold(), input);

    let report = decode(input, output, length, codec, false)?;

    println!(
        "  {} {} samples @ {} Hz",
        "Carrier:".dimmed(),
        report.num_samples,
        report.sample_rate
    );
    println!("  {} {} bytes", "Payload:".dimmed(), report.payload_len);
    println!("  {} {}", "Hash:".dimmed(), report.payload_hash);
    println!(
        "{} {} ({:.2}s)",
        "Wrote".green().bold(),
        report.output.display(),
        report.elapsed_seconds
    );

    Ok(ExitCode::SUCCESS)
}
