//! SpecSteg End-to-End Test Infrastructure
//!
//! This crate exercises the codec and the `specsteg` binary through real
//! files:
//!
//! - Round trip: payload -> carrier WAV -> recovered payload
//! - Comparison: recovered payload against the original
//! - **Determinism**: identical inputs give byte-identical carriers
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p specsteg-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult};
pub use fixtures::PayloadFixture;
pub use harness::{CliResult, TestHarness};
