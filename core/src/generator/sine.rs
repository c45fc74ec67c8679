use crate::generator::{require_finite, require_nonzero, require_positive};
use crate::prelude::{SampleRate, WaveError, WaveResult, WaveSource, Waveform, DEFAULT_AMPLITUDE};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Sine wave described by cycle count and frequency in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineByFrequency {
    pub cycles: f64,
    pub frequency: f64,
    pub sample_rate: SampleRate,
    pub amplitude: f64,
}

impl SineByFrequency {
    pub fn new(cycles: f64, frequency: f64, sample_rate: SampleRate) -> Self {
        Self {
            cycles,
            frequency,
            sample_rate,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Duration in seconds covered by the requested cycles.
    pub fn duration(&self) -> f64 {
        self.cycles / self.frequency
    }

    /// Number of samples, truncated from `sample_rate * cycles / frequency`.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate.as_f64() * self.duration()).floor() as usize
    }
}

impl WaveSource for SineByFrequency {
    fn generate(&self) -> WaveResult<Waveform> {
        let cycles = require_positive("cycles", self.cycles)?;
        let frequency = require_positive("frequency", self.frequency)?;
        let amplitude = require_finite("amplitude", self.amplitude)?;

        let duration = cycles / frequency;
        let count = self.sample_count();
        if count == 0 {
            return Err(WaveError::invalid(
                "cycles",
                format!(
                    "{cycles} cycles at {frequency} Hz span less than one sample at {}",
                    self.sample_rate
                ),
            ));
        }

        // Half-open grid over [0, duration): the closing boundary sample is left out.
        let step = duration / count as f64;
        let samples = (0..count)
            .map(|i| amplitude * (TAU * frequency * (i as f64 * step)).sin())
            .collect::<Vec<_>>();

        LogManager::new("generator").detail(&format!(
            "{} -> {} samples",
            self.label(),
            samples.len()
        ));
        Ok(Waveform::new(samples))
    }

    fn label(&self) -> String {
        format!(
            "sine {} cycles @ {} Hz / {}",
            self.cycles, self.frequency, self.sample_rate
        )
    }
}

/// Sine wave described by an integer period length in samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineByPeriod {
    pub period: usize,
    pub cycles: usize,
    pub amplitude: f64,
}

impl SineByPeriod {
    pub fn new(period: usize, cycles: usize) -> Self {
        Self {
            period,
            cycles,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }
}

impl WaveSource for SineByPeriod {
    fn generate(&self) -> WaveResult<Waveform> {
        let period = require_nonzero("period", self.period)?;
        let cycles = require_nonzero("cycles", self.cycles)?;
        let amplitude = require_finite("amplitude", self.amplitude)?;
        let total = period.checked_mul(cycles).ok_or_else(|| {
            WaveError::invalid("cycles", format!("{period} x {cycles} samples overflows"))
        })?;

        // Phase restarts every period, so each cycle repeats exactly.
        let samples = (0..total)
            .map(|i| amplitude * (TAU * (i % period) as f64 / period as f64).sin())
            .collect::<Vec<_>>();

        LogManager::new("generator").detail(&format!("{} -> {} samples", self.label(), total));
        Ok(Waveform::new(samples))
    }

    fn label(&self) -> String {
        format!("sine period {} x {} cycles", self.period, self.cycles)
    }
}

/// Sine wave sampled at `sample_rate` over `cycles / frequency` seconds.
pub fn generate_sine_by_frequency(
    cycles: f64,
    frequency: f64,
    sample_rate: SampleRate,
    amplitude: f64,
) -> WaveResult<Waveform> {
    SineByFrequency::new(cycles, frequency, sample_rate)
        .with_amplitude(amplitude)
        .generate()
}

/// Sine wave with exactly `period * cycles` samples.
pub fn generate_sine_by_period(
    period: usize,
    cycles: usize,
    amplitude: f64,
) -> WaveResult<Waveform> {
    SineByPeriod::new(period, cycles)
        .with_amplitude(amplitude)
        .generate()
}
