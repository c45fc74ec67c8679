use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wavecore::export::columns::DEFAULT_COLUMNS_FILE;
use wavecore::export::{AudioEncoding, OverflowPolicy, FULL_SCALE};
use wavecore::generator::{
    Alternating, Constant, HannWindow, Ramp, SineByFrequency, SineByPeriod,
};
use wavecore::prelude::{DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};
use wavecore::{SampleRate, WaveSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveShape {
    SineByFrequency,
    SineByPeriod,
    Ramp,
    Constant,
    Alternating,
    Hann,
}

/// Where each output goes. Unset outputs are skipped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub structured: Option<PathBuf>,
    pub columns: Option<PathBuf>,
    pub audio: Option<PathBuf>,
    pub table: Option<PathBuf>,
    /// Two-channel CSV holding the stereo phase-spread pair, sized to the
    /// generated waveform.
    pub stereo_table: Option<PathBuf>,
}

/// Every tunable of a generation job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub shape: WaveShape,
    pub cycles: f64,
    pub frequency: f64,
    pub sample_rate: u32,
    pub amplitude: f64,
    pub period: usize,
    /// Sample count for ramp and fill shapes. Falls back to `sample_rate`.
    pub length: Option<usize>,
    pub audio_scale: f64,
    pub overflow: OverflowPolicy,
    pub outputs: OutputPaths,
    /// Append the run summary to this log file.
    pub summary_log: Option<PathBuf>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            shape: WaveShape::SineByPeriod,
            cycles: 2.0,
            frequency: 440.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            period: 128,
            length: None,
            audio_scale: FULL_SCALE,
            overflow: OverflowPolicy::Clamp,
            outputs: OutputPaths {
                columns: Some(PathBuf::from(DEFAULT_COLUMNS_FILE)),
                ..Default::default()
            },
            summary_log: None,
        }
    }
}

impl JobConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading job config {}", path_ref.display()))?;
        let config: JobConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing job config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn sample_rate(&self) -> anyhow::Result<SampleRate> {
        SampleRate::new(self.sample_rate).context("validating sample_rate")
    }

    pub fn encoding(&self) -> AudioEncoding {
        AudioEncoding {
            scale: self.audio_scale,
            overflow: self.overflow,
        }
    }

    fn fill_length(&self) -> usize {
        self.length.unwrap_or(self.sample_rate as usize)
    }

    /// Whole cycles for the period-based sine. Fractional counts are rejected.
    fn whole_cycles(&self) -> anyhow::Result<usize> {
        if self.cycles.fract() != 0.0 || self.cycles < 0.0 || !self.cycles.is_finite() {
            anyhow::bail!(
                "cycles must be a whole number for sine_by_period, got {}",
                self.cycles
            );
        }
        Ok(self.cycles as usize)
    }

    pub fn to_source(&self) -> anyhow::Result<Box<dyn WaveSource>> {
        let source: Box<dyn WaveSource> = match self.shape {
            WaveShape::SineByFrequency => Box::new(
                SineByFrequency::new(self.cycles, self.frequency, self.sample_rate()?)
                    .with_amplitude(self.amplitude),
            ),
            WaveShape::SineByPeriod => Box::new(
                SineByPeriod::new(self.period, self.whole_cycles()?).with_amplitude(self.amplitude),
            ),
            WaveShape::Ramp => Box::new(Ramp {
                length: self.fill_length(),
            }),
            WaveShape::Constant => Box::new(Constant {
                length: self.fill_length(),
                value: self.amplitude,
            }),
            WaveShape::Alternating => Box::new(Alternating {
                length: self.fill_length(),
            }),
            WaveShape::Hann => Box::new(HannWindow {
                length: self.fill_length(),
            }),
        };
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_describe_two_cycle_column_job() {
        let cfg = JobConfig::default();
        assert_eq!(cfg.shape, WaveShape::SineByPeriod);
        assert_eq!(cfg.period, 128);
        assert_eq!(cfg.sample_rate, 44_100);
        assert_eq!(
            cfg.outputs.columns.as_deref(),
            Some(Path::new("sine_wave_side_by_side.json"))
        );
        let wave = cfg.to_source().unwrap().generate().unwrap();
        assert_eq!(wave.len(), 256);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"shape: sine_by_frequency\ncycles: 5\nfrequency: 440\namplitude: 0.25\noverflow: reject\noutputs:\n  audio: out/sine.wav\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = JobConfig::load(&path).unwrap();
        assert_eq!(cfg.shape, WaveShape::SineByFrequency);
        assert_eq!(cfg.amplitude, 0.25);
        assert_eq!(cfg.sample_rate, 44_100);
        assert_eq!(cfg.overflow, OverflowPolicy::Reject);
        assert_eq!(cfg.outputs.audio.as_deref(), Some(Path::new("out/sine.wav")));
        assert!(cfg.outputs.columns.is_none());
        assert!(cfg.summary_log.is_none());
    }

    #[test]
    fn config_load_reads_stereo_output_and_summary_log() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"shape: hann\nlength: 1024\nsummary_log: logs/runs.log\noutputs:\n  stereo_table: out/stereo.csv\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = JobConfig::load(&path).unwrap();
        assert_eq!(cfg.shape, WaveShape::Hann);
        assert_eq!(
            cfg.outputs.stereo_table.as_deref(),
            Some(Path::new("out/stereo.csv"))
        );
        assert_eq!(cfg.summary_log.as_deref(), Some(Path::new("logs/runs.log")));
    }

    #[test]
    fn fractional_cycles_are_rejected_for_period_sine() {
        let cfg = JobConfig {
            cycles: 1.5,
            ..Default::default()
        };
        assert!(cfg.to_source().is_err());
    }

    #[test]
    fn ramp_length_defaults_to_sample_rate() {
        let cfg = JobConfig {
            shape: WaveShape::Ramp,
            sample_rate: 8_000,
            ..Default::default()
        };
        assert_eq!(cfg.to_source().unwrap().generate().unwrap().len(), 8_000);
    }

    #[test]
    fn zero_sample_rate_fails_validation() {
        let cfg = JobConfig {
            shape: WaveShape::SineByFrequency,
            sample_rate: 0,
            ..Default::default()
        };
        assert!(cfg.to_source().is_err());
    }
}
