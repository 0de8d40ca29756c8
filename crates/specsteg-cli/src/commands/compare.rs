//! Compare command implementation
//!
//! Reports how many bytes of a recovered payload differ from the original.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use specsteg_codec::{compare_files, ComparisonReport};

use super::json_output::emit;

/// Comparison result with the compared paths.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    /// Reference file
    pub reference: String,
    /// Candidate file
    pub candidate: String,
    /// Byte-level comparison
    #[serde(flatten)]
    pub report: ComparisonReport,
}

/// Run the compare command
///
/// # Arguments
/// * `reference` - Original file
/// * `candidate` - File to check against it
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(reference: &str, candidate: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        emit(compare(reference, candidate))
    } else {
        run_human(reference, candidate)
    }
}

fn compare(reference: &str, candidate: &str) -> Result<CompareResult> {
    let report = compare_files(Path::new(reference), Path::new(candidate))
        .with_context(|| format!("Failed to compare {} and {}", reference, candidate))?;
    Ok(CompareResult {
        reference: reference.to_string(),
        candidate: candidate.to_string(),
        report,
    })
}

fn run_human(reference: &str, candidate: &str) -> Result<ExitCode> {
    println!("{}", "Comparing files:".cyan().bold());
    println!("  {} {}", "Reference:".dimmed(), reference);
    println!("  {} {}", "Candidate:".dimmed(), candidate);

    let result = compare(reference, candidate)?;
    let report = &result.report;

    println!(
        "  {} {} of {} bytes",
        "Differing:".dimmed(),
        report.differing_bytes,
        report.reference_len
    );
    let percent = format!("{:.4}% different", report.percent_different);
    if report.is_identical() {
        println!("{} {}", "Identical".green().bold(), percent.dimmed());
    } else {
        println!("{}", percent.yellow().bold());
    }

    Ok(ExitCode::SUCCESS)
}
