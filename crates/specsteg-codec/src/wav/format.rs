//! Sample format conversion.

use crate::config::SampleFormat;

/// Converts a sample format to a mono hound spec.
pub fn wav_spec(sample_rate: u32, format: SampleFormat) -> hound::WavSpec {
    let (bits_per_sample, sample_format) = match format {
        SampleFormat::Float32 => (32, hound::SampleFormat::Float),
        SampleFormat::Int16 => (16, hound::SampleFormat::Int),
    };
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample,
        sample_format,
    }
}

/// PCM payload of a carrier, ready for hashing or writing.
#[derive(Debug, Clone, PartialEq)]
pub enum PcmData {
    /// 32-bit float samples.
    Float32(Vec<f32>),
    /// 16-bit integer samples.
    Int16(Vec<i16>),
}

impl PcmData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            PcmData::Float32(samples) => samples.len(),
            PcmData::Int16(samples) => samples.len(),
        }
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Little-endian bytes as they appear in the `data` chunk.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            PcmData::Float32(samples) => samples.iter().flat_map(|s| s.to_le_bytes()).collect(),
            PcmData::Int16(samples) => samples.iter().flat_map(|s| s.to_le_bytes()).collect(),
        }
    }

    /// BLAKE3 hash of the PCM bytes.
    pub fn hash(&self) -> String {
        blake3::hash(&self.to_le_bytes()).to_hex().to_string()
    }
}

/// Converts f64 samples to the requested PCM encoding.
///
/// Int16 output clips to [-1.0, 1.0]; the second value counts the samples
/// that were clipped. Float32 output never clips.
pub fn pcm_bytes(samples: &[f64], format: SampleFormat) -> (PcmData, usize) {
    match format {
        SampleFormat::Float32 => (
            PcmData::Float32(samples.iter().map(|&s| s as f32).collect()),
            0,
        ),
        SampleFormat::Int16 => {
            let mut clipped = 0;
            let pcm = samples
                .iter()
                .map(|&sample| {
                    if !(-1.0..=1.0).contains(&sample) {
                        clipped += 1;
                    }
                    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
                })
                .collect();
            (PcmData::Int16(pcm), clipped)
        }
    }
}
