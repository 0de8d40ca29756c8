//! Conjugate-symmetric spectrum construction.

use rustfft::num_complex::Complex;

/// Full spectrum built from one block of scaled values.
///
/// Layout for `k = amplitudes.len() / 2` payload bins:
///
/// ```text
/// [sentinel, c1 .. ck, 0, conj(ck) .. conj(c1)]
/// ```
///
/// Length is `2 * (k + 1)`. Bin `k + 1` is the Nyquist bin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    bins: Vec<Complex<f64>>,
}

impl SpectralFrame {
    /// Builds a frame from an even-length sequence of scaled amplitudes.
    ///
    /// The first half becomes the real parts of bins `1..=k`, the second half
    /// the imaginary parts.
    pub fn from_amplitudes(amplitudes: &[f64], sentinel: f64) -> Self {
        debug_assert!(amplitudes.len() % 2 == 0, "block must be padded to even length");

        let k = amplitudes.len() / 2;
        let (real, imag) = amplitudes.split_at(k);

        let mut bins = Vec::with_capacity(2 * (k + 1));
        bins.push(Complex::new(sentinel, 0.0));
        bins.extend(real.iter().zip(imag).map(|(&re, &im)| Complex::new(re, im)));
        bins.push(Complex::new(0.0, 0.0));

        for i in (1..=k).rev() {
            bins.push(bins[i].conj());
        }

        Self { bins }
    }

    /// Number of payload bins (`k`).
    pub fn payload_bins(&self) -> usize {
        self.bins.len() / 2 - 1
    }

    /// Full spectrum length.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the frame is empty. A built frame never is.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// All bins of the spectrum.
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Consumes the frame, returning its bins.
    pub fn into_bins(self) -> Vec<Complex<f64>> {
        self.bins
    }

    /// Whether every mirrored bin is the conjugate of its partner and the DC
    /// and Nyquist bins are real.
    pub fn is_conjugate_symmetric(&self, tolerance: f64) -> bool {
        let n = self.bins.len();
        if n == 0 {
            return true;
        }
        if self.bins[0].im.abs() > tolerance || self.bins[n / 2].im.abs() > tolerance {
            return false;
        }
        (1..n / 2).all(|i| (self.bins[n - i] - self.bins[i].conj()).norm() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_for_four_values() {
        let frame = SpectralFrame::from_amplitudes(&[1.0, 2.0, 3.0, 4.0], -45.0);
        let expected = vec![
            Complex::new(-45.0, 0.0),
            Complex::new(1.0, 3.0),
            Complex::new(2.0, 4.0),
            Complex::new(0.0, 0.0),
            Complex::new(2.0, -4.0),
            Complex::new(1.0, -3.0),
        ];
        assert_eq!(frame.bins(), expected.as_slice());
        assert_eq!(frame.payload_bins(), 2);
    }

    #[test]
    fn test_length_is_twice_bins_plus_one() {
        let amplitudes = vec![0.5; 1024];
        let frame = SpectralFrame::from_amplitudes(&amplitudes, -45.0);
        assert_eq!(frame.len(), 2 * (512 + 1));
        assert_eq!(frame.len(), 1026);
    }

    #[test]
    fn test_mirror_is_conjugate() {
        let amplitudes: Vec<f64> = (0..64).map(|i| i as f64 * 0.01).collect();
        let frame = SpectralFrame::from_amplitudes(&amplitudes, -45.0);
        assert!(frame.is_conjugate_symmetric(0.0));

        let n = frame.len();
        for i in 1..n / 2 {
            assert_eq!(frame.bins()[n - i], frame.bins()[i].conj());
        }
    }

    #[test]
    fn test_asymmetric_spectrum_detected() {
        let mut bins = SpectralFrame::from_amplitudes(&[1.0, 2.0], 0.0).into_bins();
        bins[3] = Complex::new(1.0, 2.0);
        let broken = SpectralFrame { bins };
        assert!(!broken.is_conjugate_symmetric(1e-12));
    }
}
