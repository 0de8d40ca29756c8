//! Post-encode verification.
//!
//! [`EncodeSelfCheck`] re-analyzes each freshly encoded block with the
//! decoder's reconstruction path and counts values that round back to the
//! original byte. The tally is a diagnostic only; encoding never fails
//! because of it.

use serde::Serialize;

use crate::codec::BlockCodec;
use crate::error::CodecResult;

/// Running tally of lossless conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EncodeSelfCheck {
    matches: usize,
    compared: usize,
}

impl EncodeSelfCheck {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs `audio_block` and counts exact matches against
    /// `original_floats` (the padded block as floats, before scaling).
    ///
    /// Returns the match count for this block and adds it to the tally.
    pub fn validate(
        &mut self,
        codec: &mut dyn BlockCodec,
        original_floats: &[f64],
        audio_block: &[f64],
    ) -> CodecResult<usize> {
        let reconstructed = codec.reconstruct(audio_block)?;
        let matches = original_floats
            .iter()
            .zip(&reconstructed)
            .filter(|(original, value)| **original == value.round())
            .count();

        self.matches += matches;
        self.compared += original_floats.len();
        Ok(matches)
    }

    /// Values that round-tripped exactly.
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Values compared so far, padding included.
    pub fn compared(&self) -> usize {
        self.compared
    }

    /// Percentage of values that round-tripped exactly. 100 when nothing was
    /// compared.
    pub fn lossless_percent(&self) -> f64 {
        if self.compared == 0 {
            100.0
        } else {
            self.matches as f64 * 100.0 / self.compared as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarrierKind, CodecConfig};
    use crate::cosine::CosineCodec;
    use crate::spectral::SpectralCodec;

    #[test]
    fn test_spectral_block_is_fully_lossless() {
        let mut codec = SpectralCodec::new(&CodecConfig::default());
        let block: Vec<u8> = (0..=255).collect();
        let audio = codec.encode_block(&block);
        let floats: Vec<f64> = block.iter().map(|&b| b as f64).collect();

        let mut check = EncodeSelfCheck::new();
        let matches = check.validate(&mut codec, &floats, &audio).unwrap();
        assert_eq!(matches, 256);
        assert_eq!(check.lossless_percent(), 100.0);
    }

    #[test]
    fn test_mismatches_are_counted_not_fatal() {
        let mut codec = SpectralCodec::new(&CodecConfig::default());
        let audio = codec.encode_block(&[1, 2, 3, 4]);
        let wrong = [1.0, 2.0, 9.0, 9.0];

        let mut check = EncodeSelfCheck::new();
        assert_eq!(check.validate(&mut codec, &wrong, &audio).unwrap(), 2);
        assert_eq!(check.compared(), 4);
        assert_eq!(check.lossless_percent(), 50.0);
    }

    #[test]
    fn test_tally_accumulates_across_blocks() {
        let config = CodecConfig {
            carrier: CarrierKind::Cosine,
            ..CodecConfig::default()
        };
        let mut codec = CosineCodec::new(&config);
        let mut check = EncodeSelfCheck::new();
        for block in [[0u8, 10, 20], [200, 250, 255]] {
            let audio = codec.encode_block(&block);
            let floats: Vec<f64> = block.iter().map(|&b| b as f64).collect();
            check.validate(&mut codec, &floats, &audio).unwrap();
        }
        assert_eq!(check.matches(), 6);
        assert_eq!(check.compared(), 6);
    }

    #[test]
    fn test_empty_tally_reports_full_percent() {
        assert_eq!(EncodeSelfCheck::new().lossless_percent(), 100.0);
    }
}
