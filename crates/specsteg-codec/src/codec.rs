//! Block codec abstraction shared by the carrier schemes.

use crate::config::{CarrierKind, CodecConfig};
use crate::cosine::CosineCodec;
use crate::error::CodecResult;
use crate::spectral::SpectralCodec;

/// Maps one block of payload bytes to carrier samples and back.
pub trait BlockCodec {
    /// Short name of the carrier scheme.
    fn name(&self) -> &'static str;

    /// Whether blocks must have even length before [`BlockCodec::encode_block`].
    fn pads_to_even(&self) -> bool;

    /// Number of samples produced for a block of `block_len` payload bytes,
    /// accounting for any padding byte.
    fn window_len(&self, block_len: usize) -> usize;

    /// Elements dropped from the final short window when decoding a raw
    /// stream of unknown length.
    fn trailing_trim(&self) -> usize;

    /// Encodes one block into samples.
    fn encode_block(&mut self, block: &[u8]) -> Vec<f64>;

    /// Recovers unrounded byte values from one window of samples.
    fn reconstruct(&mut self, samples: &[f64]) -> CodecResult<Vec<f64>>;

    /// Recovers bytes from one window of samples.
    fn decode_window(&mut self, samples: &[f64]) -> CodecResult<Vec<u8>>;
}

/// Builds the codec selected by `config.carrier`.
pub fn codec_for(config: &CodecConfig) -> Box<dyn BlockCodec> {
    match config.carrier {
        CarrierKind::Spectral => Box::new(SpectralCodec::new(config)),
        CarrierKind::Cosine => Box::new(CosineCodec::new(config)),
    }
}
