//! Arbitrary bytes read as a carrier must decode or fail cleanly, never
//! panic.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use specsteg_codec::wav::read_carrier;
use specsteg_codec::{CodecConfig, Framing, NoProgress, QuantizationMode, StreamAssembler};

fuzz_target!(|data: &[u8]| {
    let Ok(stream) = read_carrier(Cursor::new(data)) else {
        return;
    };

    let config = CodecConfig {
        framing: Framing::LengthPrefixed,
        quantization: QuantizationMode::Unsigned,
        ..CodecConfig::default()
    };
    if let Ok(mut assembler) = StreamAssembler::new(config) {
        let _ = assembler.decode(&stream.samples, None, &mut NoProgress);
    }
});
