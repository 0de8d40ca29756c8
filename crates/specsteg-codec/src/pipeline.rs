//! File-level encode and decode.
//!
//! These functions tie the stream assembler to the filesystem: read the
//! input, run the codec, and persist the result atomically.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::config::{CarrierKind, CodecConfig, Framing, QuantizationMode};
use crate::error::{CodecError, CodecResult};
use crate::fs_util::write_atomically;
use crate::progress::ProgressSink;
use crate::self_check::EncodeSelfCheck;
use crate::stream::StreamAssembler;
use crate::wav::{read_carrier_file, write_carrier_file, CarrierSummary};

/// Result of [`encode_file`].
#[derive(Debug, Clone, Serialize)]
pub struct EncodeReport {
    /// Payload file.
    pub input: PathBuf,
    /// Carrier file.
    pub output: PathBuf,
    /// Payload bytes read.
    pub payload_len: usize,
    /// Blocks encoded.
    pub blocks: usize,
    /// Carrier scheme.
    pub carrier: CarrierKind,
    /// Payload framing.
    pub framing: Framing,
    /// Decoder narrowing the carrier was encoded for.
    pub quantization: QuantizationMode,
    /// Written carrier.
    pub carrier_summary: CarrierSummary,
    /// Self-check tally, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_check: Option<EncodeSelfCheck>,
    /// Percent of values that converted losslessly, when checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lossless_percent: Option<f64>,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

/// Result of [`decode_file`].
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// Carrier file.
    pub input: PathBuf,
    /// Recovered payload file.
    pub output: PathBuf,
    /// Samples read from the carrier.
    pub num_samples: usize,
    /// Carrier sample rate in Hz.
    pub sample_rate: u32,
    /// Payload bytes written.
    pub payload_len: usize,
    /// BLAKE3 hash of the recovered payload.
    pub payload_hash: String,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

/// Default carrier path: the payload path with `.wav` appended.
pub fn carrier_path_for(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".wav");
    PathBuf::from(name)
}

/// Default payload path: the carrier path without its final extension, or
/// with `.decoded` appended when stripping would give back the input path.
pub fn payload_path_for(input: &Path) -> PathBuf {
    let stripped = input.with_extension("");
    if stripped == input {
        let mut name = OsString::from(input.as_os_str());
        name.push(".decoded");
        PathBuf::from(name)
    } else {
        stripped
    }
}

/// Encodes a payload file into a WAV carrier.
pub fn encode_file(
    input: &Path,
    output: Option<&Path>,
    config: &CodecConfig,
    progress: &mut dyn ProgressSink,
) -> CodecResult<EncodeReport> {
    let start = Instant::now();
    let payload = read_input(input)?;
    let output = output.map_or_else(|| carrier_path_for(input), Path::to_path_buf);

    let mut assembler = StreamAssembler::new(config.clone())?;
    let blocks = assembler.block_count(payload.len());
    let mut check = config.self_check.then(EncodeSelfCheck::new);
    let stream = assembler.encode(&payload, check.as_mut(), progress)?;

    let carrier_summary = write_carrier_file(&output, &stream, config.sample_format)?;
    info!(
        "wrote {} ({} samples, {:.3}s)",
        output.display(),
        carrier_summary.num_samples,
        carrier_summary.duration_seconds()
    );

    Ok(EncodeReport {
        input: input.to_path_buf(),
        output,
        payload_len: payload.len(),
        blocks,
        carrier: config.carrier,
        framing: config.framing,
        quantization: config.quantization,
        carrier_summary,
        lossless_percent: check.as_ref().map(EncodeSelfCheck::lossless_percent),
        self_check: check,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

/// Decodes a WAV carrier back into a payload file.
///
/// `expected_len` only applies to raw framing; see
/// [`StreamAssembler::decode`].
pub fn decode_file(
    input: &Path,
    output: Option<&Path>,
    config: &CodecConfig,
    expected_len: Option<usize>,
    progress: &mut dyn ProgressSink,
) -> CodecResult<DecodeReport> {
    let start = Instant::now();
    let stream = read_carrier_file(input)?;
    if stream.sample_rate != config.sample_rate {
        warn!(
            "carrier sample rate {} Hz differs from configured {} Hz",
            stream.sample_rate, config.sample_rate
        );
    }
    let output = output.map_or_else(|| payload_path_for(input), Path::to_path_buf);

    let mut assembler = StreamAssembler::new(config.clone())?;
    let payload = assembler.decode(&stream.samples, expected_len, progress)?;
    write_atomically(&output, &payload)?;
    info!("wrote {} ({} bytes)", output.display(), payload.len());

    Ok(DecodeReport {
        input: input.to_path_buf(),
        output,
        num_samples: stream.len(),
        sample_rate: stream.sample_rate,
        payload_len: payload.len(),
        payload_hash: blake3::hash(&payload).to_hex().to_string(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

fn read_input(path: &Path) -> CodecResult<Vec<u8>> {
    if !path.exists() {
        return Err(CodecError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read(path)?)
}
