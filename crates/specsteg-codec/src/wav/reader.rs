//! Carrier reading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::error::{CodecError, CodecResult};
use crate::stream::AudioStream;

/// Reads a mono WAV carrier.
///
/// Integer samples are normalized by their bit depth so that full scale maps
/// to [-1.0, 1.0). Float samples are taken as-is.
pub fn read_carrier<R: Read>(reader: R) -> CodecResult<AudioStream> {
    let reader = hound::WavReader::new(reader)?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(CodecError::unsupported_carrier(format!(
            "expected a mono carrier, found {} channels",
            spec.channels
        )));
    }
    if spec.sample_rate == 0 {
        return Err(CodecError::unsupported_carrier("sample rate is zero"));
    }

    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            if !(1..=32).contains(&spec.bits_per_sample) {
                return Err(CodecError::unsupported_carrier(format!(
                    "unsupported bit depth {}",
                    spec.bits_per_sample
                )));
            }
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f64 / max_val))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
    };

    debug!(
        "read carrier: {} samples at {} Hz, {}-bit {:?}",
        samples.len(),
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    Ok(AudioStream::new(samples, spec.sample_rate))
}

/// Reads a carrier file.
pub fn read_carrier_file(path: &Path) -> CodecResult<AudioStream> {
    if !path.exists() {
        return Err(CodecError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    read_carrier(BufReader::new(File::open(path)?))
}
