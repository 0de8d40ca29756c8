//! Carrier writing.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use log::warn;
use serde::Serialize;

use super::format::{pcm_bytes, wav_spec, PcmData};
use crate::config::SampleFormat;
use crate::error::CodecResult;
use crate::fs_util::write_atomically;
use crate::stream::AudioStream;

/// What was written for a carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierSummary {
    /// Samples in the carrier.
    pub num_samples: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// PCM encoding.
    pub sample_format: SampleFormat,
    /// Samples clipped to [-1, 1] (Int16 only).
    pub clipped_samples: usize,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
}

impl CarrierSummary {
    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}

/// Writes a carrier as a mono WAV stream.
pub fn write_carrier<W: Write + Seek>(
    writer: W,
    stream: &AudioStream,
    format: SampleFormat,
) -> CodecResult<CarrierSummary> {
    let (pcm, clipped_samples) = pcm_bytes(&stream.samples, format);
    if clipped_samples > 0 {
        warn!(
            "{} of {} samples clipped to [-1, 1] for {} output; the payload may not decode",
            clipped_samples,
            pcm.len(),
            format
        );
    }

    let mut wav = hound::WavWriter::new(writer, wav_spec(stream.sample_rate, format))?;
    match &pcm {
        PcmData::Float32(samples) => {
            for &sample in samples {
                wav.write_sample(sample)?;
            }
        }
        PcmData::Int16(samples) => {
            for &sample in samples {
                wav.write_sample(sample)?;
            }
        }
    }
    wav.finalize()?;

    Ok(CarrierSummary {
        num_samples: pcm.len(),
        sample_rate: stream.sample_rate,
        sample_format: format,
        clipped_samples,
        pcm_hash: pcm.hash(),
    })
}

/// Writes a carrier to a byte vector.
pub fn write_carrier_to_vec(
    stream: &AudioStream,
    format: SampleFormat,
) -> CodecResult<(Vec<u8>, CarrierSummary)> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + stream.len() * 4));
    let summary = write_carrier(&mut cursor, stream, format)?;
    Ok((cursor.into_inner(), summary))
}

/// Writes a carrier file. The destination is replaced atomically, so a
/// failed write never leaves a partial file behind.
pub fn write_carrier_file(
    path: &Path,
    stream: &AudioStream,
    format: SampleFormat,
) -> CodecResult<CarrierSummary> {
    let (bytes, summary) = write_carrier_to_vec(stream, format)?;
    write_atomically(path, &bytes)?;
    Ok(summary)
}
