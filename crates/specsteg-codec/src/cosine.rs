//! Cosine carrier: one sample per byte.
//!
//! Each byte `b` becomes `cos(b / 256 * PI) * amplitude`. Decoding inverts
//! with `acos`, which is only defined for `|sample / amplitude| <= 1`.

use std::f64::consts::PI;

use crate::codec::BlockCodec;
use crate::config::{CodecConfig, QuantizationMode};
use crate::error::{CodecError, CodecResult};
use crate::quantize::quantize;

/// Number of phase steps across `[0, PI)`.
const COSINE_LEVELS: f64 = 256.0;

/// Slack for samples that land a rounding error outside `[-1, 1]`.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Cosine-modulated carrier.
#[derive(Debug, Clone)]
pub struct CosineCodec {
    amplitude: f64,
    window_len: usize,
}

impl CosineCodec {
    /// Creates a cosine codec from a config.
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            amplitude: config.cosine_amplitude,
            window_len: config.block_size,
        }
    }
}

impl BlockCodec for CosineCodec {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn pads_to_even(&self) -> bool {
        false
    }

    fn window_len(&self, block_len: usize) -> usize {
        block_len
    }

    fn trailing_trim(&self) -> usize {
        0
    }

    fn encode_block(&mut self, block: &[u8]) -> Vec<f64> {
        block
            .iter()
            .map(|&b| (b as f64 / COSINE_LEVELS * PI).cos() * self.amplitude)
            .collect()
    }

    fn reconstruct(&mut self, samples: &[f64]) -> CodecResult<Vec<f64>> {
        if samples.is_empty() || samples.len() > self.window_len {
            return Err(CodecError::BlockLengthMismatch {
                expected: self.window_len,
                found: samples.len(),
            });
        }

        samples
            .iter()
            .enumerate()
            .map(|(index, &sample)| {
                let normalized = sample / self.amplitude;
                if !normalized.is_finite() || normalized.abs() > 1.0 + DOMAIN_TOLERANCE {
                    return Err(CodecError::ValueOutOfDomain {
                        index,
                        value: sample,
                    });
                }
                Ok(normalized.clamp(-1.0, 1.0).acos() * COSINE_LEVELS / PI)
            })
            .collect()
    }

    fn decode_window(&mut self, samples: &[f64]) -> CodecResult<Vec<u8>> {
        let values = self.reconstruct(samples)?;
        quantize(&values, QuantizationMode::Unsigned)
    }
}
