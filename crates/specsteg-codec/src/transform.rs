//! FFT wrapper around `rustfft` with per-length plan caching.

use std::collections::HashMap;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Forward and inverse DFT over `f64` with cached plans.
///
/// The inverse is normalized by `1/N`, so `forward(inverse(x)) == x` up to
/// floating-point error.
pub struct Transform {
    planner: FftPlanner<f64>,
    forward: HashMap<usize, Arc<dyn Fft<f64>>>,
    inverse: HashMap<usize, Arc<dyn Fft<f64>>>,
}

impl Transform {
    /// Creates an empty transform cache.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            forward: HashMap::new(),
            inverse: HashMap::new(),
        }
    }

    /// Forward DFT of a real-valued sequence.
    pub fn forward(&mut self, samples: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        if buffer.is_empty() {
            return buffer;
        }

        let n = buffer.len();
        let planner = &mut self.planner;
        let fft = self
            .forward
            .entry(n)
            .or_insert_with(|| planner.plan_fft_forward(n));
        fft.process(&mut buffer);
        buffer
    }

    /// Inverse DFT, scaled by `1/N`.
    pub fn inverse(&mut self, mut spectrum: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
        let n = spectrum.len();
        if n == 0 {
            return spectrum;
        }

        let planner = &mut self.planner;
        let ifft = self
            .inverse
            .entry(n)
            .or_insert_with(|| planner.plan_fft_inverse(n));
        ifft.process(&mut spectrum);

        let scale = 1.0 / n as f64;
        for value in spectrum.iter_mut() {
            *value *= scale;
        }
        spectrum
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lengths: Vec<_> = self.forward.keys().chain(self.inverse.keys()).collect();
        lengths.sort_unstable();
        lengths.dedup();
        f.debug_struct("Transform")
            .field("planned_lengths", &lengths)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_of_impulse_is_flat() {
        let mut transform = Transform::new();
        let mut impulse = vec![0.0; 8];
        impulse[0] = 1.0;
        let spectrum = transform.forward(&impulse);
        for bin in spectrum {
            assert!((bin.re - 1.0).abs() < 1e-12);
            assert!(bin.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_inverse_undoes_forward() {
        let mut transform = Transform::new();
        let samples: Vec<f64> = (0..1026).map(|i| ((i * 37) % 101) as f64 / 50.0 - 1.0).collect();
        let spectrum = transform.forward(&samples);
        let restored = transform.inverse(spectrum);
        for (a, b) in samples.iter().zip(restored.iter()) {
            assert!((a - b.re).abs() < 1e-9);
            assert!(b.im.abs() < 1e-9);
        }
    }

    #[test]
    fn test_plans_are_reused() {
        let mut transform = Transform::new();
        transform.forward(&[1.0; 10]);
        transform.forward(&[2.0; 10]);
        transform.forward(&[3.0; 12]);
        assert_eq!(transform.forward.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let mut transform = Transform::new();
        assert!(transform.forward(&[]).is_empty());
        assert!(transform.inverse(Vec::new()).is_empty());
    }
}
