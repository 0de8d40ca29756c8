//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. The output is always a single pretty
//! printed object with a `success` flag, a list of errors with stable codes,
//! and the command result on success.

use serde::Serialize;
use specsteg_codec::CodecError;

/// Error codes for CLI-level failures. Codec failures pass their own
/// `STEG_XXX` codes through.
pub mod error_codes {
    /// Failure with no more specific code
    pub const UNKNOWN: &str = "CLI_001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "STEG_001", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts any command error into a JSON error, keeping the codec's code
/// when the chain contains a [`CodecError`].
pub fn error_to_json(err: &anyhow::Error) -> JsonError {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CodecError>())
        .map(CodecError::code)
        .unwrap_or(error_codes::UNKNOWN);
    let file = err
        .chain()
        .find_map(|cause| match cause.downcast_ref::<CodecError>() {
            Some(CodecError::MissingInput { path }) => Some(path.display().to_string()),
            _ => None,
        });

    JsonError {
        code: code.to_string(),
        message: format!("{:#}", err),
        file,
    }
}

/// Output envelope shared by every command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Pretty JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Prints a command outcome as JSON and maps it to an exit code.
pub fn emit<T: Serialize>(outcome: anyhow::Result<T>) -> anyhow::Result<std::process::ExitCode> {
    let (output, code) = match outcome {
        Ok(result) => (CommandOutput::success(result), 0),
        Err(e) => (CommandOutput::failure(vec![error_to_json(&e)]), 1),
    };
    println!("{}", output.to_json()?);
    Ok(std::process::ExitCode::from(code))
}
