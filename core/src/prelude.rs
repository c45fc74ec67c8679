use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::ops::Deref;
use std::path::PathBuf;

/// Sample rate used when a caller does not supply one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude used when a caller does not supply one.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Ordered amplitude samples produced once by a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waveform {
    samples: Vec<f64>,
}

impl Waveform {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }
}

impl Deref for Waveform {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl From<Vec<f64>> for Waveform {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

/// Samples per second. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SampleRate(NonZeroU32);

impl SampleRate {
    pub fn new(hz: u32) -> WaveResult<Self> {
        NonZeroU32::new(hz)
            .map(Self)
            .ok_or_else(|| WaveError::invalid("sample_rate", "must be greater than zero"))
    }

    pub fn hz(self) -> u32 {
        self.0.get()
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_SAMPLE_RATE).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = WaveError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Self::new(hz)
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> Self {
        rate.hz()
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// Error type shared by generators, exporters and readers.
#[derive(thiserror::Error, Debug)]
pub enum WaveError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error(
        "insufficient samples: two cycles of period {period} need {required}, got {available}"
    )]
    InsufficientSamples {
        period: usize,
        required: usize,
        available: usize,
    },
    #[error("sample {index} ({value}) overflows 16-bit PCM at scale {scale}")]
    AmplitudeOverflow { index: usize, value: f64, scale: f64 },
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("malformed table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Audio(#[from] hound::Error),
}

impl WaveError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type WaveResult<T> = Result<T, WaveError>;

/// Anything that can produce a waveform from its own parameters.
pub trait WaveSource {
    fn generate(&self) -> WaveResult<Waveform>;
    fn label(&self) -> String;
}

/// A persistence target for a finished waveform.
pub trait WaveSink {
    fn write(&self, waveform: &Waveform) -> WaveResult<()>;
    fn label(&self) -> String;
}
