//! WAV carrier persistence.
//!
//! Carriers are written as mono WAV files with no timestamps or variable
//! metadata, so identical sample streams always produce identical bytes. The
//! BLAKE3 hash of the PCM data identifies a carrier independently of its
//! header.

mod format;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use format::{pcm_bytes, wav_spec, PcmData};
pub use reader::{read_carrier, read_carrier_file};
pub use writer::{write_carrier, write_carrier_file, write_carrier_to_vec, CarrierSummary};
