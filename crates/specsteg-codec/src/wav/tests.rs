//! Tests for carrier persistence.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;
use crate::config::SampleFormat;
use crate::error::CodecError;
use crate::stream::AudioStream;

fn ramp(len: usize) -> AudioStream {
    let samples = (0..len).map(|i| (i as f64 / len as f64) * 1.6 - 0.8).collect();
    AudioStream::new(samples, 44100)
}

// =========================================================================
// Sample conversion
// =========================================================================

#[test]
fn test_wav_spec_float32() {
    let spec = wav_spec(44100, SampleFormat::Float32);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
}

#[test]
fn test_wav_spec_int16() {
    let spec = wav_spec(22050, SampleFormat::Int16);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
}

#[test]
fn test_int16_conversion_clips_and_counts() {
    let (pcm, clipped) = pcm_bytes(&[0.0, 0.5, -0.5, 1.0, -1.0, 2.0, -3.0], SampleFormat::Int16);
    assert_eq!(clipped, 2);
    assert_eq!(
        pcm,
        PcmData::Int16(vec![0, 16384, -16384, 32767, -32767, 32767, -32767])
    );
}

#[test]
fn test_float32_conversion_never_clips() {
    let (pcm, clipped) = pcm_bytes(&[2.5, -0.044], SampleFormat::Float32);
    assert_eq!(clipped, 0);
    assert_eq!(pcm, PcmData::Float32(vec![2.5, -0.044]));
    assert_eq!(pcm.to_le_bytes().len(), 8);
}

// =========================================================================
// Writing
// =========================================================================

#[test]
fn test_float32_header_layout() {
    let (bytes, summary) = write_carrier_to_vec(&ramp(100), SampleFormat::Float32).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(summary.num_samples, 100);
    assert_eq!(summary.sample_format, SampleFormat::Float32);
    assert_eq!(summary.clipped_samples, 0);
    assert_eq!(summary.pcm_hash.len(), 64);
}

#[test]
fn test_writes_are_deterministic() {
    let stream = ramp(4096);
    let (a, sa) = write_carrier_to_vec(&stream, SampleFormat::Float32).unwrap();
    let (b, sb) = write_carrier_to_vec(&stream, SampleFormat::Float32).unwrap();
    assert_eq!(a, b);
    assert_eq!(sa.pcm_hash, sb.pcm_hash);
}

#[test]
fn test_pcm_hash_depends_on_format() {
    let stream = ramp(64);
    let (_, float) = write_carrier_to_vec(&stream, SampleFormat::Float32).unwrap();
    let (_, int) = write_carrier_to_vec(&stream, SampleFormat::Int16).unwrap();
    assert_ne!(float.pcm_hash, int.pcm_hash);
}

#[test]
fn test_summary_duration() {
    let (_, summary) = write_carrier_to_vec(&ramp(44100), SampleFormat::Int16).unwrap();
    assert!((summary.duration_seconds() - 1.0).abs() < 1e-12);
}

// =========================================================================
// Reading
// =========================================================================

#[test]
fn test_float32_round_trip_is_f32_exact() {
    let stream = ramp(1000);
    let (bytes, _) = write_carrier_to_vec(&stream, SampleFormat::Float32).unwrap();
    let read = read_carrier(Cursor::new(bytes)).unwrap();
    assert_eq!(read.sample_rate, 44100);
    assert_eq!(read.len(), 1000);
    for (a, b) in stream.samples.iter().zip(&read.samples) {
        assert_eq!(*a as f32 as f64, *b);
    }
}

#[test]
fn test_int16_round_trip_within_one_step() {
    let stream = ramp(1000);
    let (bytes, _) = write_carrier_to_vec(&stream, SampleFormat::Int16).unwrap();
    let read = read_carrier(Cursor::new(bytes)).unwrap();
    for (a, b) in stream.samples.iter().zip(&read.samples) {
        assert!((a - b).abs() < 2.0 / 32768.0, "{a} vs {b}");
    }
}

#[test]
fn test_stereo_rejected() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();
    }
    let err = read_carrier(Cursor::new(cursor.into_inner())).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedCarrierFormat { .. }));
    assert!(err.to_string().contains("2 channels"));
}

#[test]
fn test_garbage_rejected() {
    let err = read_carrier(Cursor::new(b"definitely not a wav file".to_vec())).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedCarrierFormat { .. }));
}

#[test]
fn test_missing_file() {
    let err = read_carrier_file(std::path::Path::new("/nonexistent/carrier.wav")).unwrap_err();
    assert!(matches!(err, CodecError::MissingInput { .. }));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carrier.wav");
    let stream = ramp(512);
    let summary = write_carrier_file(&path, &stream, SampleFormat::Float32).unwrap();
    assert_eq!(summary.num_samples, 512);

    let read = read_carrier_file(&path).unwrap();
    assert_eq!(read.len(), 512);
}
