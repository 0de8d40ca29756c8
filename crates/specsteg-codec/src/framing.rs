//! Length-prefixed payload framing.
//!
//! The header stores the payload length as five 7-bit groups, least
//! significant group first. Every header byte stays below 128 so the header
//! survives the signed 8-bit narrowing of the legacy decoder.

use crate::error::{CodecError, CodecResult};

/// Header length in bytes.
pub const HEADER_LEN: usize = 5;

const GROUP_BITS: u32 = 7;
const GROUP_MASK: u64 = 0x7f;

/// Encodes a payload length into a header.
pub fn encode_header(len: u32) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    let mut value = len as u64;
    for byte in header.iter_mut() {
        *byte = (value & GROUP_MASK) as u8;
        value >>= GROUP_BITS;
    }
    header
}

/// Decodes a payload length from the start of `bytes`.
pub fn decode_header(bytes: &[u8]) -> CodecResult<u32> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::invalid_header(format!(
            "need {} header bytes, carrier holds {}",
            HEADER_LEN,
            bytes.len()
        )));
    }

    let mut value = 0u64;
    for (i, &byte) in bytes[..HEADER_LEN].iter().enumerate() {
        if byte > GROUP_MASK as u8 {
            return Err(CodecError::invalid_header(format!(
                "header byte {} is 0x{:02X}, expected < 0x80",
                i, byte
            )));
        }
        value |= (byte as u64) << (GROUP_BITS * i as u32);
    }

    u32::try_from(value)
        .map_err(|_| CodecError::invalid_header(format!("length {} overflows u32", value)))
}

/// Prepends the length header to a payload.
pub fn wrap(payload: &[u8]) -> CodecResult<Vec<u8>> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        CodecError::invalid_header(format!(
            "payload of {} bytes exceeds the u32 length field",
            payload.len()
        ))
    })?;

    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.extend_from_slice(&encode_header(len));
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Strips the header and returns exactly the payload it describes.
///
/// Bytes beyond the declared length (block padding, trailing garbage) are
/// discarded.
pub fn unwrap(mut framed: Vec<u8>) -> CodecResult<Vec<u8>> {
    let len = decode_header(&framed)? as usize;
    let available = framed.len() - HEADER_LEN;
    if available < len {
        return Err(CodecError::TruncatedCarrier {
            expected: len,
            found: available,
        });
    }

    framed.truncate(HEADER_LEN + len);
    framed.drain(..HEADER_LEN);
    Ok(framed)
}
