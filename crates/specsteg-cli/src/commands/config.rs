//! Config command implementation
//!
//! Prints the effective codec configuration after applying the config file
//! and flag overrides.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::json_output::emit;
use crate::options::CodecArgs;

/// Run the config command
///
/// # Arguments
/// * `codec` - Codec flags
/// * `json_output` - Whether to wrap the config in the JSON output envelope
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(codec: &CodecArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return emit(codec.resolve());
    }

    let config = codec.resolve()?;
    let source = codec
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    println!("{} {}", "Effective config from:".cyan().bold(), source);
    println!("{}", config.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
