use crate::generator::{require_finite, require_nonzero};
use crate::prelude::{WaveResult, WaveSource, Waveform};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Identity signal: every sample equals its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ramp {
    pub length: usize,
}

impl WaveSource for Ramp {
    fn generate(&self) -> WaveResult<Waveform> {
        let length = require_nonzero("length", self.length)?;
        Ok(Waveform::new((0..length).map(|i| i as f64).collect()))
    }

    fn label(&self) -> String {
        format!("ramp of {}", self.length)
    }
}

/// Flat signal holding one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub length: usize,
    pub value: f64,
}

impl WaveSource for Constant {
    fn generate(&self) -> WaveResult<Waveform> {
        let length = require_nonzero("length", self.length)?;
        let value = require_finite("value", self.value)?;
        Ok(Waveform::new(vec![value; length]))
    }

    fn label(&self) -> String {
        format!("constant {} x {}", self.value, self.length)
    }
}

/// `0.0, 1.0, 0.0, 1.0, ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternating {
    pub length: usize,
}

impl WaveSource for Alternating {
    fn generate(&self) -> WaveResult<Waveform> {
        let length = require_nonzero("length", self.length)?;
        Ok(Waveform::new(
            (0..length).map(|i| (i % 2) as f64).collect(),
        ))
    }

    fn label(&self) -> String {
        format!("alternating 0/1 x {}", self.length)
    }
}

/// Symmetric Hann window, zero at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HannWindow {
    pub length: usize,
}

impl WaveSource for HannWindow {
    fn generate(&self) -> WaveResult<Waveform> {
        let length = require_nonzero("length", self.length)?;
        if length == 1 {
            return Ok(Waveform::new(vec![1.0]));
        }
        let span = (length - 1) as f64;
        Ok(Waveform::new(
            (0..length)
                .map(|i| 0.5 * (1.0 - (TAU * i as f64 / span).cos()))
                .collect(),
        ))
    }

    fn label(&self) -> String {
        format!("hann window of {}", self.length)
    }
}

/// `[0.0, 1.0, ..., length - 1]`, used to check that persistence keeps values intact.
pub fn generate_ramp(length: usize) -> WaveResult<Waveform> {
    Ramp { length }.generate()
}

pub fn generate_constant(length: usize, value: f64) -> WaveResult<Waveform> {
    Constant { length, value }.generate()
}

pub fn generate_alternating(length: usize) -> WaveResult<Waveform> {
    Alternating { length }.generate()
}

pub fn generate_hann(length: usize) -> WaveResult<Waveform> {
    HannWindow { length }.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_values_match_indices() {
        let ramp = generate_ramp(100).unwrap();
        assert_eq!(ramp.len(), 100);
        for (i, value) in ramp.iter().enumerate() {
            assert_eq!(*value, i as f64);
        }
    }

    #[test]
    fn empty_fills_are_rejected() {
        assert!(generate_ramp(0).is_err());
        assert!(generate_constant(0, 1.0).is_err());
        assert!(generate_alternating(0).is_err());
        assert!(generate_hann(0).is_err());
    }

    #[test]
    fn constant_and_alternating_patterns() {
        assert_eq!(generate_constant(3, 1.0).unwrap().as_slice(), &[1.0, 1.0, 1.0]);
        assert_eq!(
            generate_alternating(5).unwrap().as_slice(),
            &[0.0, 1.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn hann_window_is_symmetric_with_unit_centre() {
        let window = generate_hann(9).unwrap();
        assert!(window[0].abs() < 1e-12);
        assert!(window[8].abs() < 1e-12);
        assert!((window[4] - 1.0).abs() < 1e-12);
        for i in 0..9 {
            assert!((window[i] - window[8 - i]).abs() < 1e-12);
        }
        assert_eq!(generate_hann(1).unwrap().as_slice(), &[1.0]);
    }
}
