//! Spectral carrier.
//!
//! A block of `L` bytes (even) becomes `L/2` complex bins: the first half of
//! the block scaled into the real parts, the second half into the imaginary
//! parts. Bin 0 holds a fixed sentinel and bin `L/2 + 1` is zero. The bins are
//! mirrored as complex conjugates so the inverse FFT is real, giving `L + 2`
//! samples per block.

mod decoder;
mod encoder;
mod frame;


pub use decoder::SpectralDecoder;
pub use encoder::SpectralEncoder;
pub use frame::SpectralFrame;

use crate::codec::BlockCodec;
use crate::config::CodecConfig;
use crate::error::CodecResult;

/// Scale constants shared by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralScale {
    /// Divisor that normalizes a byte value to a fraction.
    pub byte_max: f64,
    /// Spectral amplitude of a full-scale byte.
    pub noise_scale: f64,
    /// Real value of bin 0.
    pub sentinel: f64,
}

impl SpectralScale {
    /// Extracts the spectral constants from a config.
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            byte_max: config.byte_max,
            noise_scale: config.noise_scale,
            sentinel: config.sentinel,
        }
    }

    /// Byte value to bin amplitude.
    #[inline]
    pub fn to_amplitude(&self, byte: f64) -> f64 {
        byte / self.byte_max * self.noise_scale
    }

    /// Bin amplitude back to an unrounded byte value.
    #[inline]
    pub fn to_byte_value(&self, amplitude: f64) -> f64 {
        amplitude * self.byte_max / self.noise_scale
    }
}

impl Default for SpectralScale {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

/// Number of samples for a block of `block_len` bytes after even padding.
pub fn spectral_window_len(block_len: usize) -> usize {
    block_len + block_len % 2 + 2
}

/// Spectral encoder and decoder paired behind [`BlockCodec`].
#[derive(Debug)]
pub struct SpectralCodec {
    encoder: SpectralEncoder,
    decoder: SpectralDecoder,
}

impl SpectralCodec {
    /// Creates a spectral codec from a config.
    pub fn new(config: &CodecConfig) -> Self {
        let window_len = spectral_window_len(config.block_size);
        Self {
            encoder: SpectralEncoder::new(SpectralScale::from_config(config)),
            decoder: SpectralDecoder::new(
                SpectralScale::from_config(config),
                config.quantization,
                window_len,
            ),
        }
    }
}

impl BlockCodec for SpectralCodec {
    fn name(&self) -> &'static str {
        "spectral"
    }

    fn pads_to_even(&self) -> bool {
        true
    }

    fn window_len(&self, block_len: usize) -> usize {
        spectral_window_len(block_len)
    }

    fn trailing_trim(&self) -> usize {
        1
    }

    fn encode_block(&mut self, block: &[u8]) -> Vec<f64> {
        self.encoder.encode_block(block)
    }

    fn reconstruct(&mut self, samples: &[f64]) -> CodecResult<Vec<f64>> {
        self.decoder.reconstruct(samples)
    }

    fn decode_window(&mut self, samples: &[f64]) -> CodecResult<Vec<u8>> {
        self.decoder.decode_window(samples)
    }
}
