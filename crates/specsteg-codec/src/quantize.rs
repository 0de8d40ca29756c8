//! Narrowing of reconstructed values to bytes.

use crate::config::QuantizationMode;
use crate::error::{CodecError, CodecResult};

/// Rounds each value to the nearest integer and narrows it to a byte.
///
/// `SignedLegacy` saturates to the signed 8-bit range and emits the
/// two's-complement byte, so any value at or above 128 comes out as 127.
/// `Unsigned` keeps the full byte range and rejects anything outside it.
pub fn quantize(values: &[f64], mode: QuantizationMode) -> CodecResult<Vec<u8>> {
    match mode {
        QuantizationMode::SignedLegacy => Ok(values.iter().map(|&v| narrow_signed(v)).collect()),
        QuantizationMode::Unsigned => values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                narrow_unsigned(value).ok_or(CodecError::ValueOutOfDomain { index, value })
            })
            .collect(),
    }
}

/// Signed 8-bit narrowing. `as i8` saturates, NaN becomes 0.
#[inline]
fn narrow_signed(value: f64) -> u8 {
    value.round() as i8 as u8
}

#[inline]
fn narrow_unsigned(value: f64) -> Option<u8> {
    let rounded = value.round();
    if (0.0..=255.0).contains(&rounded) {
        Some(rounded as u8)
    } else {
        None
    }
}
