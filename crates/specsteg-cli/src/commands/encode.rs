//! Encode command implementation
//!
//! Hides a payload file inside a WAV carrier.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use specsteg_codec::{encode_file, EncodeReport};

use super::json_output::emit;
use crate::options::CodecArgs;
use crate::progress::ConsoleProgress;

/// Run the encode command
///
/// # Arguments
/// * `input` - Payload file
/// * `output` - Carrier file (default: input path with `.wav` appended)
/// * `codec` - Codec flags
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &str, output: Option<&str>, codec: &CodecArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        emit(encode(input, output, codec, true))
    } else {
        run_human(input, output, codec)
    }
}

fn encode(input: &str, output: Option<&str>, codec: &CodecArgs, quiet: bool) -> Result<EncodeReport> {
    let config = codec.resolve()?;
    let mut progress = ConsoleProgress::new(quiet);
    encode_file(Path::new(input), output.map(Path::new), &config, &mut progress)
        .with_context(|| format!("Failed to encode {}", input))
}

fn run_human(input: &str, output: Option<&str>, codec: &CodecArgs) -> Result<ExitCode> {
    println!("{} {}", "Encoding:".cyan().bold(), input);

    let report = encode(input, output, codec, false)?;

    println!(
        "  {} {} bytes in {} blocks ({} carrier, {} framing)",
        "Payload:".dimmed(),
        report.payload_len,
        report.blocks,
        report.carrier,
        report.framing
    );
    println!(
        "  {} {} samples @ {} Hz, {:.3}s {}",
        "Carrier:".dimmed(),
        report.carrier_summary.num_samples,
        report.carrier_summary.sample_rate,
        report.carrier_summary.duration_seconds(),
        report.carrier_summary.sample_format
    );
    if report.carrier_summary.clipped_samples > 0 {
        println!(
            "  {} {} samples clipped",
            "Warning:".yellow().bold(),
            report.carrier_summary.clipped_samples
        );
    }
    if let Some(percent) = report.lossless_percent {
        let line = format!("{:.3}% lossless", percent);
        if percent < 100.0 {
            println!("  {} {}", "Check:".dimmed(), line.yellow());
        } else {
            println!("  {} {}", "Check:".dimmed(), line.green());
        }
    }
    println!("  {} {}", "PCM hash:".dimmed(), report.carrier_summary.pcm_hash);
    println!(
        "{} {} ({:.2}s)",
        "Wrote".green().bold(),
        report.output.display(),
        report.elapsed_seconds
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_default_carrier() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("secret.txt");
        std::fs::write(&input, b"attack at dawn").unwrap();

        let code = run(input.to_str().unwrap(), None, &CodecArgs::default(), false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(tmp.path().join("secret.txt.wav").exists());
    }

    #[test]
    fn encode_missing_input_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("absent.txt");
        assert!(run(input.to_str().unwrap(), None, &CodecArgs::default(), false).is_err());
    }

    #[test]
    fn encode_json_reports_failure_with_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("absent.txt");
        let code = run(input.to_str().unwrap(), None, &CodecArgs::default(), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
