//! Comparison of recovered payloads against originals.

use pretty_assertions::assert_eq;
use specsteg_codec::{compare_files, decode_file, encode_file, CodecConfig, NoProgress};
use specsteg_tests::PayloadFixture;

#[test]
fn file_compared_with_itself_has_no_difference() {
    let fixture = PayloadFixture::full_range(4000);
    let report = compare_files(&fixture.payload_path, &fixture.payload_path).unwrap();
    assert_eq!(report.differing_bytes, 0);
    assert_eq!(report.percent_different, 0.0);
}

#[test]
fn k_differing_positions_are_reported() {
    let fixture = PayloadFixture::full_range(2000);
    let mut altered = fixture.payload.clone();
    for i in (0..2000).step_by(100) {
        altered[i] = altered[i].wrapping_add(1);
    }
    let candidate = fixture.file("altered.bin");
    std::fs::write(&candidate, &altered).unwrap();

    let report = compare_files(&fixture.payload_path, &candidate).unwrap();
    assert_eq!(report.differing_bytes, 20);
    assert!((report.percent_different - 1.0).abs() < 1e-12);
}

#[test]
fn recovered_low_half_payload_matches_original() {
    let fixture = PayloadFixture::low_half(5000);
    let carrier = fixture.file("carrier.wav");
    let recovered = fixture.file("recovered.bin");
    let config = CodecConfig::default();
    encode_file(&fixture.payload_path, Some(&carrier), &config, &mut NoProgress).unwrap();
    decode_file(&carrier, Some(&recovered), &config, Some(5000), &mut NoProgress).unwrap();

    let report = compare_files(&fixture.payload_path, &recovered).unwrap();
    assert!(report.is_identical(), "{:?}", report);
}

#[test]
fn legacy_decode_of_full_range_payload_shows_loss() {
    let fixture = PayloadFixture::full_range(5000);
    let carrier = fixture.file("carrier.wav");
    let recovered = fixture.file("recovered.bin");
    let config = CodecConfig::default();
    encode_file(&fixture.payload_path, Some(&carrier), &config, &mut NoProgress).unwrap();
    decode_file(&carrier, Some(&recovered), &config, Some(5000), &mut NoProgress).unwrap();

    let report = compare_files(&fixture.payload_path, &recovered).unwrap();
    let high = fixture.payload.iter().filter(|&&b| b > 127).count();
    assert_eq!(report.differing_bytes, high);
}
