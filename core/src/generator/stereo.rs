use crate::generator::{require_finite, require_nonzero};
use crate::prelude::{WaveResult, Waveform, DEFAULT_AMPLITUDE};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Two sine channels spanning the same buffer at different rates.
///
/// The left channel completes one cycle over `length` samples and the right
/// channel completes two, so the pair drifts in and out of phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoPhaseSpread {
    pub length: usize,
    pub amplitude: f64,
}

impl StereoPhaseSpread {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Returns `(left, right)`, both `length` samples long.
    pub fn generate_pair(&self) -> WaveResult<(Waveform, Waveform)> {
        let length = require_nonzero("length", self.length)?;
        let amplitude = require_finite("amplitude", self.amplitude)?;
        let span = length as f64;

        let channel = |cycles: f64| {
            Waveform::new(
                (0..length)
                    .map(|i| amplitude * (TAU * cycles * i as f64 / span).sin())
                    .collect(),
            )
        };
        let left = channel(1.0);
        let right = channel(2.0);

        LogManager::new("generator").detail(&format!("{} -> {} frames", self.label(), length));
        Ok((left, right))
    }

    pub fn label(&self) -> String {
        format!("stereo sine 1:2 cycles over {}", self.length)
    }
}

/// Left channel with one cycle and right channel with two over `length` samples.
pub fn generate_stereo_sine(length: usize, amplitude: f64) -> WaveResult<(Waveform, Waveform)> {
    StereoPhaseSpread::new(length)
        .with_amplitude(amplitude)
        .generate_pair()
}
