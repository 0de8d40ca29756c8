//! Codec configuration.
//!
//! All tunables (block size, scale constants, sample rate, operating modes)
//! live in one [`CodecConfig`] value that is handed to the codec at
//! construction time. Configs deserialize from JSON with every field optional.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Default payload bytes per block.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Largest accepted block size.
pub const MAX_BLOCK_SIZE: usize = 1 << 20;

/// Default carrier sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Which carrier scheme maps bytes to samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierKind {
    /// Bytes become conjugate-symmetric spectral bins of an inverse FFT.
    #[default]
    Spectral,
    /// One sample per byte on a cosine curve.
    Cosine,
}

/// How recovered values are narrowed to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationMode {
    /// Signed 8-bit narrowing. Values >= 128 saturate to 127.
    #[default]
    SignedLegacy,
    /// Full unsigned byte range. Values outside 0..=255 are rejected.
    Unsigned,
}

/// Whether the payload length travels inside the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// No header; decode runs until the samples run out.
    #[default]
    Raw,
    /// A 7-bit-safe length header precedes the payload.
    LengthPrefixed,
}

/// PCM sample encoding of the persisted carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFormat {
    /// 32-bit IEEE float.
    #[default]
    Float32,
    /// 16-bit signed integer, clipped to [-1, 1].
    Int16,
}

macro_rules! snake_case_names {
    ($($ty:ty => { $($variant:ident => $name:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match self {
                        $(Self::$variant => f.write_str($name),)+
                    }
                }
            }

            impl FromStr for $ty {
                type Err = CodecError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    match s {
                        $($name => Ok(Self::$variant),)+
                        other => Err(CodecError::invalid_config(
                            stringify!($ty),
                            format!(
                                "unknown value '{}', expected one of: {}",
                                other,
                                [$($name),+].join(", ")
                            ),
                        )),
                    }
                }
            }
        )+
    };
}

snake_case_names! {
    CarrierKind => { Spectral => "spectral", Cosine => "cosine" },
    QuantizationMode => { SignedLegacy => "signed_legacy", Unsigned => "unsigned" },
    Framing => { Raw => "raw", LengthPrefixed => "length_prefixed" },
    SampleFormat => { Float32 => "float32", Int16 => "int16" },
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Payload bytes per block.
    pub block_size: usize,
    /// Divisor that normalizes a byte value to a fraction.
    pub byte_max: f64,
    /// Spectral amplitude of a full-scale byte.
    pub noise_scale: f64,
    /// Real value of spectral bin 0.
    pub sentinel: f64,
    /// Carrier sample rate in Hz.
    pub sample_rate: u32,
    /// Percent of progress between notifications.
    pub progress_every: f64,
    /// Carrier scheme.
    pub carrier: CarrierKind,
    /// Peak amplitude of the cosine carrier.
    pub cosine_amplitude: f64,
    /// Byte narrowing mode for the spectral decoder.
    pub quantization: QuantizationMode,
    /// Payload framing.
    pub framing: Framing,
    /// Sample encoding of the persisted carrier.
    pub sample_format: SampleFormat,
    /// Re-analyze every encoded block and tally lossless matches.
    pub self_check: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            byte_max: 255.0,
            noise_scale: 2.0,
            sentinel: -45.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            progress_every: 10.0,
            carrier: CarrierKind::Spectral,
            cosine_amplitude: 1.0,
            quantization: QuantizationMode::SignedLegacy,
            framing: Framing::Raw,
            sample_format: SampleFormat::Float32,
            self_check: true,
        }
    }
}

impl CodecConfig {
    /// Parses a config from JSON and validates it.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> CodecResult<Self> {
        if !path.exists() {
            return Err(CodecError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json_pretty(&self) -> CodecResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::invalid_config("json", e.to_string()))
    }

    /// Checks that every field is usable by the codec.
    pub fn validate(&self) -> CodecResult<()> {
        if self.block_size < 2 {
            return Err(CodecError::invalid_config(
                "block_size",
                format!("must be at least 2, got {}", self.block_size),
            ));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(CodecError::invalid_config(
                "block_size",
                format!("must be at most {}, got {}", MAX_BLOCK_SIZE, self.block_size),
            ));
        }
        if self.carrier == CarrierKind::Spectral && self.block_size % 2 != 0 {
            return Err(CodecError::invalid_config(
                "block_size",
                format!("spectral carrier needs an even block size, got {}", self.block_size),
            ));
        }
        check_positive("byte_max", self.byte_max)?;
        check_positive("noise_scale", self.noise_scale)?;
        check_positive("cosine_amplitude", self.cosine_amplitude)?;
        if !self.sentinel.is_finite() {
            return Err(CodecError::invalid_config("sentinel", "must be finite"));
        }
        if self.sample_rate == 0 {
            return Err(CodecError::invalid_config("sample_rate", "must be non-zero"));
        }
        if !(self.progress_every > 0.0 && self.progress_every <= 100.0) {
            return Err(CodecError::invalid_config(
                "progress_every",
                format!("must be in (0, 100], got {}", self.progress_every),
            ));
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> CodecResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CodecError::invalid_config(
            name,
            format!("must be finite and positive, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = CodecConfig::default();
        assert_eq!(config.block_size, 1024);
        assert_eq!(config.byte_max, 255.0);
        assert_eq!(config.noise_scale, 2.0);
        assert_eq!(config.sentinel, -45.0);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.quantization, QuantizationMode::SignedLegacy);
        assert_eq!(config.framing, Framing::Raw);
        assert!(config.self_check);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CodecConfig::from_json(
            r#"{"block_size": 256, "quantization": "unsigned", "framing": "length_prefixed"}"#,
        )
        .unwrap();
        assert_eq!(config.block_size, 256);
        assert_eq!(config.quantization, QuantizationMode::Unsigned);
        assert_eq!(config.framing, Framing::LengthPrefixed);
        assert_eq!(config.noise_scale, 2.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CodecConfig::from_json(r#"{"blocksize": 256}"#).unwrap_err();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CodecConfig {
            carrier: CarrierKind::Cosine,
            sample_format: SampleFormat::Int16,
            ..CodecConfig::default()
        };
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"sample_format\": \"int16\""));
        let parsed = CodecConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_oversized_block_size_rejected() {
        let largest = CodecConfig {
            block_size: MAX_BLOCK_SIZE,
            ..CodecConfig::default()
        };
        assert!(largest.validate().is_ok());

        for block_size in [MAX_BLOCK_SIZE + 2, 1 << 61, usize::MAX - 1] {
            let config = CodecConfig {
                block_size,
                ..CodecConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, CodecError::InvalidConfig { .. }), "{block_size}");
        }

        let cosine = CodecConfig {
            block_size: usize::MAX,
            carrier: CarrierKind::Cosine,
            ..CodecConfig::default()
        };
        assert!(cosine.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            CodecConfig {
                block_size: 1,
                ..CodecConfig::default()
            },
            CodecConfig {
                noise_scale: 0.0,
                ..CodecConfig::default()
            },
            CodecConfig {
                byte_max: f64::NAN,
                ..CodecConfig::default()
            },
            CodecConfig {
                sample_rate: 0,
                ..CodecConfig::default()
            },
            CodecConfig {
                progress_every: 0.0,
                ..CodecConfig::default()
            },
            CodecConfig {
                sentinel: f64::INFINITY,
                ..CodecConfig::default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }
    }

    #[test]
    fn test_odd_block_size_only_for_cosine() {
        let spectral = CodecConfig {
            block_size: 1023,
            ..CodecConfig::default()
        };
        assert!(spectral.validate().is_err());

        let cosine = CodecConfig {
            carrier: CarrierKind::Cosine,
            ..spectral
        };
        assert!(cosine.validate().is_ok());
    }

    #[test]
    fn test_display_matches_serde_names() {
        assert_eq!(QuantizationMode::SignedLegacy.to_string(), "signed_legacy");
        assert_eq!(Framing::LengthPrefixed.to_string(), "length_prefixed");
        assert_eq!(
            serde_json::to_string(&SampleFormat::Int16).unwrap(),
            "\"int16\""
        );
        assert_eq!(CarrierKind::Cosine.to_string(), "cosine");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("int16".parse::<SampleFormat>().unwrap(), SampleFormat::Int16);
        assert_eq!(
            "length_prefixed".parse::<Framing>().unwrap(),
            Framing::LengthPrefixed
        );
        let err = "signed".parse::<QuantizationMode>().unwrap_err();
        assert!(err.to_string().contains("signed_legacy, unsigned"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = CodecConfig::from_json_file(Path::new("/nonexistent/specsteg.json")).unwrap_err();
        assert!(matches!(err, CodecError::MissingInput { .. }));
    }
}
