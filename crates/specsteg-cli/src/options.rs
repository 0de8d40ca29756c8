//! Codec options shared by every command.
//!
//! A config file (JSON) supplies the base configuration; individual flags
//! override single fields on top of it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use specsteg_codec::{CarrierKind, CodecConfig, Framing, QuantizationMode, SampleFormat};

/// Codec flags accepted by `encode`, `decode` and `config`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CodecArgs {
    /// Path to a JSON codec config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Payload bytes per block
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Carrier scheme
    #[arg(long, value_parser = ["spectral", "cosine"])]
    pub carrier: Option<String>,

    /// Byte narrowing on decode
    #[arg(long, value_parser = ["signed_legacy", "unsigned"])]
    pub quantization: Option<String>,

    /// Payload framing
    #[arg(long, value_parser = ["raw", "length_prefixed"])]
    pub framing: Option<String>,

    /// PCM encoding of the carrier file
    #[arg(long, value_parser = ["float32", "int16"])]
    pub sample_format: Option<String>,

    /// Carrier sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Skip the post-encode lossless check
    #[arg(long)]
    pub no_verify: bool,
}

impl CodecArgs {
    /// Builds the effective config: file (or defaults), then flag overrides.
    pub fn resolve(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => CodecConfig::default(),
        };

        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(carrier) = &self.carrier {
            config.carrier = carrier.parse::<CarrierKind>()?;
        }
        if let Some(quantization) = &self.quantization {
            config.quantization = quantization.parse::<QuantizationMode>()?;
        }
        if let Some(framing) = &self.framing {
            config.framing = framing.parse::<Framing>()?;
        }
        if let Some(sample_format) = &self.sample_format {
            config.sample_format = sample_format.parse::<SampleFormat>()?;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if self.no_verify {
            config.self_check = false;
        }

        config.validate().context("Invalid codec configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(CodecArgs::default().resolve().unwrap(), CodecConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("codec.json");
        std::fs::write(&path, r#"{"block_size": 512, "framing": "length_prefixed"}"#).unwrap();

        let args = CodecArgs {
            config: Some(path),
            block_size: Some(256),
            quantization: Some("unsigned".to_string()),
            no_verify: true,
            ..CodecArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.block_size, 256);
        assert_eq!(config.framing, Framing::LengthPrefixed);
        assert_eq!(config.quantization, QuantizationMode::Unsigned);
        assert!(!config.self_check);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = CodecArgs {
            block_size: Some(1023),
            ..CodecArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(format!("{:#}", err).contains("even block size"));
    }

    #[test]
    fn test_missing_config_file() {
        let args = CodecArgs {
            config: Some(PathBuf::from("/nonexistent/codec.json")),
            ..CodecArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
