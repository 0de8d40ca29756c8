//! Determinism checks for carrier generation.
//!
//! Encoding is a pure function of payload and config, so repeated runs must
//! produce byte-identical carriers. [`verify_determinism`] runs a generator
//! several times and reports the first differing byte if any.

use std::fmt;

/// First byte that differs between two runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstDifference {
    /// Byte offset (or the shorter length when sizes differ).
    pub offset: usize,
    /// Run (0-indexed) that disagreed with run 0.
    pub run_index: usize,
    /// Output size of run 0.
    pub expected_len: usize,
    /// Output size of the disagreeing run.
    pub actual_len: usize,
}

impl fmt::Display for FirstDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} differs from run 0 at byte {} ({} vs {} bytes)",
            self.run_index, self.offset, self.actual_len, self.expected_len
        )
    }
}

/// Outcome of [`verify_determinism`].
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether every run matched run 0.
    pub is_deterministic: bool,
    /// Runs performed.
    pub runs: usize,
    /// BLAKE3 hash of run 0.
    pub hash: String,
    /// Where the outputs first diverged.
    pub difference: Option<FirstDifference>,
}

impl DeterminismResult {
    /// Panic with details if the runs diverged.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.difference {
            panic!(
                "Non-deterministic output after {} runs (hash of run 0: {}): {}",
                self.runs, self.hash, diff
            );
        }
    }
}

/// BLAKE3 hex digest of a byte slice.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate` `runs` times (at least 2) and compares every output
/// against the first.
pub fn verify_determinism<F, T>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> T,
    T: AsRef<[u8]>,
{
    let runs = runs.max(2);
    let first = generate().as_ref().to_vec();
    let hash = compute_hash(&first);

    for run_index in 1..runs {
        let output = generate();
        let output = output.as_ref();
        let mismatch = first
            .iter()
            .zip(output)
            .position(|(a, b)| a != b)
            .or_else(|| (first.len() != output.len()).then(|| first.len().min(output.len())));

        if let Some(offset) = mismatch {
            return DeterminismResult {
                is_deterministic: false,
                runs: run_index + 1,
                hash,
                difference: Some(FirstDifference {
                    offset,
                    run_index,
                    expected_len: first.len(),
                    actual_len: output.len(),
                }),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        difference: None,
    }
}
