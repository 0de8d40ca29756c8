//! Config parsing must never panic, and accepted configs must survive a
//! serialize/parse cycle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use specsteg_codec::CodecConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = CodecConfig::from_json(text) {
        let reparsed = config
            .to_json_pretty()
            .and_then(|json| CodecConfig::from_json(&json));
        assert_eq!(reparsed.ok(), Some(config));
    }
});
