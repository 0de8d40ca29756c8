//! SpecSteg Codec
//!
//! This crate hides arbitrary byte payloads inside synthesized audio and
//! recovers them by re-analyzing the audio.
//!
//! # Overview
//!
//! The payload is split into fixed-size blocks. Each block becomes one
//! window of audio:
//!
//! - **Spectral carrier** - block bytes fill the real and imaginary parts of
//!   a conjugate-symmetric spectrum whose inverse FFT is a real signal. The
//!   decoder runs a forward FFT over each window and reads the bins back.
//! - **Cosine carrier** - one sample per byte on a cosine curve, inverted
//!   with `acos`.
//!
//! Windows are concatenated into one mono stream and persisted as WAV.
//!
//! # Determinism
//!
//! Encoding is a pure function of the payload and the [`CodecConfig`]. The
//! same input always produces byte-identical carrier files, and every
//! encode reports the BLAKE3 hash of the written PCM data.
//!
//! # Example
//!
//! ```ignore
//! use specsteg_codec::{CodecConfig, NoProgress, StreamAssembler};
//!
//! let mut assembler = StreamAssembler::new(CodecConfig::default())?;
//! let stream = assembler.encode(b"hello", None, &mut NoProgress)?;
//! let payload = assembler.decode(&stream.samples, Some(5), &mut NoProgress)?;
//! assert_eq!(payload, b"hello");
//! ```
//!
//! # Crate Structure
//!
//! - [`spectral`] - Spectral encoder, decoder and frame construction
//! - [`cosine`] - Cosine carrier
//! - [`stream`] - Block-by-block assembly of whole payloads
//! - [`self_check`] - Post-encode lossless verification
//! - [`framing`] - Optional length header
//! - [`wav`] - Deterministic WAV carrier persistence
//! - [`pipeline`] - File-level encode and decode
//! - [`compare`] - Byte comparison of recovered payloads

pub mod chunker;
pub mod codec;
pub mod compare;
pub mod config;
pub mod cosine;
pub mod error;
pub mod framing;
mod fs_util;
pub mod pipeline;
pub mod progress;
pub mod quantize;
pub mod self_check;
pub mod spectral;
pub mod stream;
pub mod transform;
pub mod wav;

// Re-export main types at crate root
pub use chunker::{FrameBlock, FrameChunker};
pub use codec::{codec_for, BlockCodec};
pub use compare::{compare_files, compare_readers, ComparisonReport};
pub use config::{
    CarrierKind, CodecConfig, Framing, QuantizationMode, SampleFormat, MAX_BLOCK_SIZE,
};
pub use error::{CodecError, CodecResult};
pub use pipeline::{
    carrier_path_for, decode_file, encode_file, payload_path_for, DecodeReport, EncodeReport,
};
pub use progress::{NoProgress, ProgressSink, ProgressUpdate, Stage};
pub use self_check::EncodeSelfCheck;
pub use spectral::{SpectralCodec, SpectralDecoder, SpectralEncoder};
pub use stream::{AudioStream, StreamAssembler};
pub use wav::CarrierSummary;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::io::Cursor;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn random_payload(seed: u64, len: usize, max: u8) -> Vec<u8> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(0..=max)).collect()
    }

    fn through_wav(config: CodecConfig, payload: &[u8]) -> Vec<u8> {
        let mut assembler = StreamAssembler::new(config.clone()).unwrap();
        let stream = assembler.encode(payload, None, &mut NoProgress).unwrap();
        let (bytes, summary) = wav::write_carrier_to_vec(&stream, config.sample_format).unwrap();
        assert_eq!(summary.num_samples, stream.len());

        let read = wav::read_carrier(Cursor::new(bytes)).unwrap();
        assembler
            .decode(&read.samples, Some(payload.len()), &mut NoProgress)
            .unwrap()
    }

    #[test]
    fn test_legacy_round_trip_through_float_wav() {
        let payload = random_payload(42, 5000, 127);
        assert_eq!(through_wav(CodecConfig::default(), &payload), payload);
    }

    #[test]
    fn test_unsigned_round_trip_through_float_wav() {
        let payload = random_payload(7, 4096, 255);
        let config = CodecConfig {
            quantization: QuantizationMode::Unsigned,
            ..CodecConfig::default()
        };
        assert_eq!(through_wav(config, &payload), payload);
    }

    #[test]
    fn test_cosine_round_trip_through_float_wav() {
        let payload = random_payload(9, 3000, 255);
        let config = CodecConfig {
            carrier: CarrierKind::Cosine,
            ..CodecConfig::default()
        };
        assert_eq!(through_wav(config, &payload), payload);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let payload = random_payload(1, 2048, 127);
        let encode = || {
            let mut assembler = StreamAssembler::new(CodecConfig::default()).unwrap();
            let stream = assembler.encode(&payload, None, &mut NoProgress).unwrap();
            wav::write_carrier_to_vec(&stream, SampleFormat::Float32)
                .unwrap()
                .0
        };
        assert_eq!(encode(), encode());
    }

    #[test]
    fn test_custom_block_size() {
        let payload = random_payload(3, 1000, 127);
        let config = CodecConfig {
            block_size: 256,
            framing: Framing::LengthPrefixed,
            ..CodecConfig::default()
        };
        let mut assembler = StreamAssembler::new(config).unwrap();
        let stream = assembler.encode(&payload, None, &mut NoProgress).unwrap();
        assert_eq!(assembler.window_len(), 258);
        let decoded = assembler.decode(&stream.samples, None, &mut NoProgress).unwrap();
        assert_eq!(decoded, payload);
    }
}
