//! Byte-level comparison of a recovered payload against its original.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Chunk size used by [`compare_files`].
pub const DEFAULT_COMPARE_CHUNK: usize = 1024;

/// Outcome of comparing a candidate against a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Bytes in the reference.
    pub reference_len: usize,
    /// Reference positions whose candidate byte is equal.
    pub matching_bytes: usize,
    /// Reference bytes that are missing or different in the candidate.
    pub differing_bytes: usize,
    /// `differing_bytes / reference_len * 100`, or 0 for an empty reference.
    pub percent_different: f64,
}

impl ComparisonReport {
    /// Whether the candidate reproduces the reference exactly.
    pub fn is_identical(&self) -> bool {
        self.differing_bytes == 0
    }
}

/// Compares two byte sources chunk by chunk.
///
/// Positions are compared only where both sources have data. Reference bytes
/// past the end of the candidate count as differing; candidate bytes past
/// the end of the reference are ignored.
pub fn compare_readers<A: Read, B: Read>(
    mut reference: A,
    mut candidate: B,
    chunk: usize,
) -> CodecResult<ComparisonReport> {
    if chunk == 0 {
        return Err(CodecError::invalid_config("chunk", "must be non-zero"));
    }

    let mut ref_buf = vec![0u8; chunk];
    let mut cand_buf = vec![0u8; chunk];
    let mut reference_len = 0;
    let mut matching_bytes = 0;
    let mut candidate_done = false;

    loop {
        let n = read_up_to(&mut reference, &mut ref_buf)?;
        if n == 0 {
            break;
        }
        reference_len += n;

        if candidate_done {
            continue;
        }
        let m = read_up_to(&mut candidate, &mut cand_buf[..n])?;
        candidate_done = m < n;
        matching_bytes += ref_buf[..m]
            .iter()
            .zip(&cand_buf[..m])
            .filter(|(a, b)| a == b)
            .count();
    }

    let differing_bytes = reference_len - matching_bytes;
    let percent_different = if reference_len == 0 {
        0.0
    } else {
        differing_bytes as f64 / reference_len as f64 * 100.0
    };

    Ok(ComparisonReport {
        reference_len,
        matching_bytes,
        differing_bytes,
        percent_different,
    })
}

/// Compares two files.
pub fn compare_files(reference: &Path, candidate: &Path) -> CodecResult<ComparisonReport> {
    let open = |path: &Path| -> CodecResult<BufReader<File>> {
        if !path.exists() {
            return Err(CodecError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        Ok(BufReader::new(File::open(path)?))
    };
    compare_readers(open(reference)?, open(candidate)?, DEFAULT_COMPARE_CHUNK)
}

/// Fills `buf` as far as the source allows. Returns the bytes read; less
/// than `buf.len()` only at end of input.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> CodecResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compare(a: &[u8], b: &[u8], chunk: usize) -> ComparisonReport {
        compare_readers(a, b, chunk).unwrap()
    }

    #[test]
    fn test_identical_sources() {
        let data: Vec<u8> = (0..5000).map(|i| (i % 251) as u8).collect();
        let report = compare(&data, &data, 1024);
        assert_eq!(report.differing_bytes, 0);
        assert_eq!(report.percent_different, 0.0);
        assert!(report.is_identical());
    }

    #[test]
    fn test_k_differing_bytes() {
        let a = vec![7u8; 2000];
        let mut b = a.clone();
        for i in [0, 999, 1000, 1023, 1024, 1999] {
            b[i] = 8;
        }
        let report = compare(&a, &b, 1024);
        assert_eq!(report.differing_bytes, 6);
        assert_eq!(report.matching_bytes, 1994);
        assert!((report.percent_different - 6.0 / 2000.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_candidate_counts_missing_bytes() {
        let report = compare(&[1, 2, 3, 4, 5], &[1, 2, 3], 2);
        assert_eq!(report.reference_len, 5);
        assert_eq!(report.differing_bytes, 2);
        assert_eq!(report.percent_different, 40.0);
    }

    #[test]
    fn test_long_candidate_tail_ignored() {
        let report = compare(&[1, 2, 3], &[1, 2, 3, 4, 5, 6], 4);
        assert!(report.is_identical());
        assert_eq!(report.reference_len, 3);
    }

    #[test]
    fn test_empty_reference() {
        let report = compare(&[], &[1, 2], 16);
        assert_eq!(report.reference_len, 0);
        assert_eq!(report.percent_different, 0.0);
    }

    #[test]
    fn test_chunk_size_does_not_matter() {
        let a: Vec<u8> = (0..777).map(|i| (i * 3 % 256) as u8).collect();
        let b: Vec<u8> = a.iter().enumerate().map(|(i, &x)| if i % 10 == 0 { !x } else { x }).collect();
        let expected = compare(&a, &b, 1);
        for chunk in [2, 7, 64, 1024, 4096] {
            assert_eq!(compare(&a, &b, chunk), expected);
        }
    }

    #[test]
    fn test_zero_chunk_rejected() {
        assert!(compare_readers(&[1u8][..], &[1u8][..], 0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.bin");
        std::fs::write(&present, b"abc").unwrap();
        let err = compare_files(&present, &dir.path().join("b.bin")).unwrap_err();
        assert!(matches!(err, CodecError::MissingInput { .. }));
    }

    #[test]
    fn test_file_against_itself() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, vec![42u8; 3000]).unwrap();
        let report = compare_files(&path, &path).unwrap();
        assert_eq!(report.differing_bytes, 0);
        assert_eq!(report.reference_len, 3000);
    }
}
