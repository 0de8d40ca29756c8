//! Spectral encoder: byte block to real audio block.

use rustfft::num_complex::Complex;

use super::frame::SpectralFrame;
use super::SpectralScale;
use crate::transform::Transform;

/// Maps byte blocks to audio blocks through an inverse FFT.
#[derive(Debug)]
pub struct SpectralEncoder {
    scale: SpectralScale,
    transform: Transform,
}

impl SpectralEncoder {
    /// Creates an encoder with the given scale constants.
    pub fn new(scale: SpectralScale) -> Self {
        Self {
            scale,
            transform: Transform::new(),
        }
    }

    /// Scale constants in use.
    pub fn scale(&self) -> &SpectralScale {
        &self.scale
    }

    /// Builds the symmetric spectrum for a block.
    ///
    /// `block` must have even length; the chunker pads the final block.
    pub fn frame_for(&self, block: &[u8]) -> SpectralFrame {
        let amplitudes: Vec<f64> = block
            .iter()
            .map(|&b| self.scale.to_amplitude(b as f64))
            .collect();
        SpectralFrame::from_amplitudes(&amplitudes, self.scale.sentinel)
    }

    /// Inverse transform of a frame, imaginary parts included.
    pub fn synthesize(&mut self, frame: SpectralFrame) -> Vec<Complex<f64>> {
        self.transform.inverse(frame.into_bins())
    }

    /// Encodes one even-length block into `block.len() + 2` samples.
    pub fn encode_block(&mut self, block: &[u8]) -> Vec<f64> {
        let frame = self.frame_for(block);
        self.synthesize(frame).into_iter().map(|c| c.re).collect()
    }
}

impl Default for SpectralEncoder {
    fn default() -> Self {
        Self::new(SpectralScale::default())
    }
}
