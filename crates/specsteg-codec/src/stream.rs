//! Block-by-block stream assembly.
//!
//! [`StreamAssembler`] walks a payload (encode) or a sample sequence (decode)
//! with a cursor, hands each block to the configured [`BlockCodec`], and
//! concatenates the results in order.

use std::borrow::Cow;

use log::{debug, info, warn};
use serde::Serialize;

use crate::chunker::FrameChunker;
use crate::codec::{codec_for, BlockCodec};
use crate::config::{CodecConfig, Framing};
use crate::error::{CodecError, CodecResult};
use crate::framing;
use crate::progress::{ProgressSink, ProgressTracker, Stage};
use crate::self_check::EncodeSelfCheck;

/// Carrier samples plus their sample rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStream {
    /// Mono samples.
    #[serde(skip)]
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioStream {
    /// Creates a stream.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the stream holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Drives a [`BlockCodec`] across a whole payload or carrier.
pub struct StreamAssembler {
    config: CodecConfig,
    codec: Box<dyn BlockCodec>,
    chunker: FrameChunker,
}

impl StreamAssembler {
    /// Validates the config and builds the codec it selects.
    pub fn new(config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        let codec = codec_for(&config);
        let chunker = FrameChunker::new(config.block_size, codec.pads_to_even());
        Ok(Self {
            config,
            codec,
            chunker,
        })
    }

    /// Config in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Samples per full block.
    pub fn window_len(&self) -> usize {
        self.codec.window_len(self.config.block_size)
    }

    /// Number of blocks a payload of `payload_len` bytes produces, framing
    /// header included.
    pub fn block_count(&self, payload_len: usize) -> usize {
        let framed_len = match self.config.framing {
            Framing::Raw => payload_len,
            Framing::LengthPrefixed => payload_len + framing::HEADER_LEN,
        };
        self.chunker.block_count(framed_len)
    }

    /// Encodes a payload into a carrier stream.
    ///
    /// When `self_check` is given, every block is re-analyzed right after
    /// encoding and the tally is updated. Mismatches never fail the encode.
    pub fn encode(
        &mut self,
        payload: &[u8],
        mut self_check: Option<&mut EncodeSelfCheck>,
        progress: &mut dyn ProgressSink,
    ) -> CodecResult<AudioStream> {
        let source: Cow<'_, [u8]> = match self.config.framing {
            Framing::Raw => Cow::Borrowed(payload),
            Framing::LengthPrefixed => Cow::Owned(framing::wrap(payload)?),
        };

        let blocks = self.chunker.blocks(&source);
        let mut samples =
            Vec::with_capacity(source.len().saturating_add(blocks.len().saturating_mul(3)));
        let mut tracker = ProgressTracker::new(Stage::Encode, source.len(), self.config.progress_every);

        for block in blocks {
            let audio = self.codec.encode_block(&block.data);

            if let Some(check) = self_check.as_deref_mut() {
                let matches = check.validate(self.codec.as_mut(), &block.to_floats(), &audio)?;
                debug!(
                    "block {}: {} bytes -> {} samples, {}/{} lossless",
                    block.index,
                    block.logical_len,
                    audio.len(),
                    matches,
                    block.data.len()
                );
            } else {
                debug!(
                    "block {}: {} bytes -> {} samples",
                    block.index,
                    block.logical_len,
                    audio.len()
                );
            }

            samples.extend_from_slice(&audio);
            tracker.advance(block.offset + block.logical_len, progress);
        }

        info!(
            "encoded {} payload bytes into {} samples ({} carrier)",
            payload.len(),
            samples.len(),
            self.codec.name()
        );
        if let Some(check) = self_check {
            if check.matches() < check.compared() {
                warn!(
                    "{:.3}% of {} values converted losslessly",
                    check.lossless_percent(),
                    check.compared()
                );
            }
        }

        Ok(AudioStream::new(samples, self.config.sample_rate))
    }

    /// Decodes carrier samples back into a payload.
    ///
    /// With raw framing the carrier carries no length. If `expected_len` is
    /// given the output is truncated to it; otherwise the final short window
    /// loses its last decoded element. With length-prefixed framing the
    /// header decides the length and `expected_len` is ignored.
    pub fn decode(
        &mut self,
        samples: &[f64],
        expected_len: Option<usize>,
        progress: &mut dyn ProgressSink,
    ) -> CodecResult<Vec<u8>> {
        let window_len = self.window_len();
        let mut output = Vec::with_capacity(samples.len());
        let mut tracker = ProgressTracker::new(Stage::Decode, samples.len(), self.config.progress_every);
        let mut last_window_short = false;

        let mut cursor = 0;
        while cursor < samples.len() {
            let end = (cursor + window_len).min(samples.len());
            let window = &samples[cursor..end];
            let bytes = self.codec.decode_window(window)?;
            debug!(
                "window at sample {}: {} samples -> {} bytes",
                cursor,
                window.len(),
                bytes.len()
            );

            output.extend_from_slice(&bytes);
            last_window_short = window.len() < window_len;
            cursor = end;
            tracker.advance(cursor, progress);
        }

        let payload = match self.config.framing {
            Framing::LengthPrefixed => framing::unwrap(output)?,
            Framing::Raw => match expected_len {
                Some(expected) => {
                    if output.len() < expected {
                        return Err(CodecError::TruncatedCarrier {
                            expected,
                            found: output.len(),
                        });
                    }
                    output.truncate(expected);
                    output
                }
                None => {
                    if last_window_short {
                        let trim = self.codec.trailing_trim().min(output.len());
                        output.truncate(output.len() - trim);
                    }
                    output
                }
            },
        };

        info!(
            "decoded {} samples into {} payload bytes",
            samples.len(),
            payload.len()
        );
        Ok(payload)
    }
}

impl std::fmt::Debug for StreamAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamAssembler")
            .field("config", &self.config)
            .field("codec", &self.codec.name())
            .finish()
    }
}
