//! Spectral decoder: audio window to bytes.

use super::SpectralScale;
use crate::config::QuantizationMode;
use crate::error::{CodecError, CodecResult};
use crate::quantize::quantize;
use crate::transform::Transform;

/// Smallest window that carries at least one payload bin.
const MIN_WINDOW_LEN: usize = 4;

/// Recovers byte blocks from audio windows through a forward FFT.
#[derive(Debug)]
pub struct SpectralDecoder {
    scale: SpectralScale,
    quantization: QuantizationMode,
    window_len: usize,
    transform: Transform,
}

impl SpectralDecoder {
    /// Creates a decoder.
    ///
    /// `window_len` is the length of a full window (payload block length
    /// plus two). Shorter windows are accepted for the final block.
    pub fn new(scale: SpectralScale, quantization: QuantizationMode, window_len: usize) -> Self {
        Self {
            scale,
            quantization,
            window_len,
            transform: Transform::new(),
        }
    }

    /// Full window length.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Forward transform, bins `1..len/2`, real parts followed by imaginary
    /// parts, rescaled to unrounded byte values.
    pub fn reconstruct(&mut self, samples: &[f64]) -> CodecResult<Vec<f64>> {
        let n = samples.len();
        if n > self.window_len || n < MIN_WINDOW_LEN || n % 2 != 0 {
            return Err(CodecError::BlockLengthMismatch {
                expected: self.window_len,
                found: n,
            });
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(CodecError::ValueOutOfDomain {
                index,
                value: samples[index],
            });
        }

        let spectrum = self.transform.forward(samples);
        let payload = &spectrum[1..n / 2];

        let mut values = Vec::with_capacity(2 * payload.len());
        values.extend(payload.iter().map(|c| self.scale.to_byte_value(c.re)));
        values.extend(payload.iter().map(|c| self.scale.to_byte_value(c.im)));
        Ok(values)
    }

    /// Decodes one window into `samples.len() - 2` bytes.
    pub fn decode_window(&mut self, samples: &[f64]) -> CodecResult<Vec<u8>> {
        let values = self.reconstruct(samples)?;
        quantize(&values, self.quantization)
    }
}
