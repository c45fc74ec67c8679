//! Shape checks used to verify generated waveforms.

use crate::prelude::SampleRate;

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Number of neighbouring pairs whose signs differ. Zero has its own sign.
pub fn zero_crossings(samples: &[f64]) -> usize {
    samples
        .windows(2)
        .filter(|pair| sign(pair[0]) != sign(pair[1]))
        .count()
}

/// Indices of local maxima, excluding both endpoints.
///
/// A sample counts when it is strictly above its left neighbour and not below
/// its right one, so a flat top is reported once at its leading edge.
pub fn find_peaks(samples: &[f64]) -> Vec<usize> {
    if samples.len() < 3 {
        return Vec::new();
    }
    (1..samples.len() - 1)
        .filter(|&i| samples[i] > samples[i - 1] && samples[i] >= samples[i + 1])
        .collect()
}

/// Frequency implied by the mean spacing between peaks.
///
/// Returns `None` when fewer than two peaks are present.
pub fn peak_frequency(samples: &[f64], sample_rate: SampleRate) -> Option<f64> {
    let peaks = find_peaks(samples);
    if peaks.len() < 2 {
        return None;
    }
    let spacing = (peaks[peaks.len() - 1] - peaks[0]) as f64 / (peaks.len() - 1) as f64;
    Some(sample_rate.as_f64() / spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_crossings_count_sign_changes() {
        assert_eq!(zero_crossings(&[]), 0);
        assert_eq!(zero_crossings(&[1.0, 2.0, 3.0]), 0);
        assert_eq!(zero_crossings(&[0.0, 1.0, -1.0, 1.0]), 3);
    }

    #[test]
    fn peaks_skip_endpoints_and_plateaus() {
        assert_eq!(find_peaks(&[5.0, 1.0, 5.0]), Vec::<usize>::new());
        assert_eq!(find_peaks(&[0.0, 2.0, 2.0, 0.0, 3.0, 1.0]), vec![1, 4]);
    }

    #[test]
    fn peak_frequency_needs_two_peaks() {
        let rate = SampleRate::new(10).unwrap();
        assert_eq!(peak_frequency(&[0.0, 1.0, 0.0], rate), None);
        let freq = peak_frequency(&[0.0, 1.0, 0.0, 0.0, 1.0, 0.0], rate).unwrap();
        assert!((freq - 10.0 / 3.0).abs() < 1e-12);
    }
}
