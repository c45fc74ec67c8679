use crate::prelude::SampleRate;
use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Forward transform of `input`, zero-padded or truncated to the planned size.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::zero());
        self.fft.process(&mut buffer);
        buffer
    }

    /// Frequency of the strongest non-DC bin up to Nyquist.
    pub fn dominant_frequency(samples: &[f64], sample_rate: SampleRate) -> Option<f64> {
        if samples.len() < 2 {
            return None;
        }
        let helper = Self::new(samples.len());
        let spectrum = helper.forward(samples);
        let half = samples.len() / 2;

        let (bin, magnitude) = spectrum[1..=half]
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx + 1, value.norm()))
            .fold((0, 0.0), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            });

        if magnitude == 0.0 {
            return None;
        }
        Some(bin as f64 * sample_rate.as_f64() / samples.len() as f64)
    }
}
