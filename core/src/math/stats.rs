pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// Largest absolute sample value, zero for an empty slice.
    pub fn peak_abs(samples: &[f64]) -> f64 {
        samples.iter().fold(0.0, |peak, &v| peak.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_constant, generate_sine_by_period};
    use std::f64::consts::SQRT_2;

    #[test]
    fn rms_of_whole_cycle_sine_is_amplitude_over_root_two() {
        for amplitude in [0.5, 1.0, 0.125] {
            let wave = generate_sine_by_period(128, 3, amplitude).unwrap();
            let rms = StatsHelper::rms(&wave);
            assert!((rms - amplitude / SQRT_2).abs() < 1e-12, "amplitude {amplitude}");
        }
    }

    #[test]
    fn rms_of_constant_is_its_magnitude() {
        let wave = generate_constant(64, -0.25).unwrap();
        assert!((StatsHelper::rms(&wave) - 0.25).abs() < 1e-15);
        assert_eq!(StatsHelper::rms(&[]), 0.0);
    }

    #[test]
    fn peak_abs_finds_sine_crest() {
        let wave = generate_sine_by_period(100, 2, 0.75).unwrap();
        assert_eq!(StatsHelper::peak_abs(&wave), 0.75);
        assert_eq!(StatsHelper::peak_abs(&[]), 0.0);
    }
}
