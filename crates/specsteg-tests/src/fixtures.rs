//! Payload fixtures.
//!
//! Payloads are generated from fixed PCG seeds so every test run sees the
//! same bytes.

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tempfile::TempDir;

/// Deterministic pseudo-random bytes in `0..=max`.
pub fn seeded_payload(seed: u64, len: usize, max: u8) -> Vec<u8> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..=max)).collect()
}

/// Bytes the signed legacy decoder recovers exactly.
pub fn low_half_payload(seed: u64, len: usize) -> Vec<u8> {
    seeded_payload(seed, len, 127)
}

/// A scratch directory holding one payload file.
pub struct PayloadFixture {
    pub root: TempDir,
    pub payload_path: PathBuf,
    pub payload: Vec<u8>,
}

impl PayloadFixture {
    /// Writes `payload` as `name` inside a fresh temp dir.
    pub fn new(name: &str, payload: Vec<u8>) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let payload_path = root.path().join(name);
        std::fs::write(&payload_path, &payload).expect("Failed to write payload");
        Self {
            root,
            payload_path,
            payload,
        }
    }

    /// Seeded low-half payload of `len` bytes.
    pub fn low_half(len: usize) -> Self {
        Self::new("payload.bin", low_half_payload(0x5eed, len))
    }

    /// Seeded full-range payload of `len` bytes.
    pub fn full_range(len: usize) -> Self {
        Self::new("payload.bin", seeded_payload(0xfeed, len, 255))
    }

    /// Path of another file inside the fixture directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }
}
