//! Mono 16-bit PCM WAV export.
//!
//! Quantization is `round(sample * scale)`. Anything that lands outside
//! `[-FULL_SCALE, FULL_SCALE]` is handled by the configured [`OverflowPolicy`]
//! and never wraps around.

use crate::export::{create_output, open_input};
use crate::prelude::{SampleRate, WaveError, WaveResult, WaveSink, Waveform};
use crate::telemetry::log::LogManager;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Largest magnitude written to the container; keeps the range symmetric.
pub const FULL_SCALE: f64 = i16::MAX as f64;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// What to do with a sample whose scaled value does not fit in 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Saturate at `±FULL_SCALE`.
    #[default]
    Clamp,
    /// Fail with [`WaveError::AmplitudeOverflow`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEncoding {
    pub scale: f64,
    pub overflow: OverflowPolicy,
}

impl Default for AudioEncoding {
    fn default() -> Self {
        Self {
            scale: FULL_SCALE,
            overflow: OverflowPolicy::Clamp,
        }
    }
}

/// Outcome of a WAV write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSummary {
    pub frames: usize,
    pub clamped: usize,
}

/// Samples and header fields read back from a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub samples: Vec<i16>,
}

/// Quantizes one sample. Returns the PCM value and whether it was clamped.
pub fn quantize(
    index: usize,
    sample: f64,
    encoding: &AudioEncoding,
) -> WaveResult<(i16, bool)> {
    let scaled = (sample * encoding.scale).round();
    if scaled.is_nan() {
        return Err(WaveError::invalid(
            "sample",
            format!("sample {index} is not a number"),
        ));
    }
    if scaled.abs() <= FULL_SCALE {
        return Ok((scaled as i16, false));
    }
    match encoding.overflow {
        OverflowPolicy::Clamp => Ok((scaled.clamp(-FULL_SCALE, FULL_SCALE) as i16, true)),
        OverflowPolicy::Reject => Err(WaveError::AmplitudeOverflow {
            index,
            value: sample,
            scale: encoding.scale,
        }),
    }
}

/// Writes `waveform` at full scale, clamping out-of-range samples.
pub fn write_audio(
    waveform: &Waveform,
    sample_rate: SampleRate,
    path: impl AsRef<Path>,
) -> WaveResult<AudioSummary> {
    write_audio_with(waveform, sample_rate, &AudioEncoding::default(), path)
}

pub fn write_audio_with(
    waveform: &Waveform,
    sample_rate: SampleRate,
    encoding: &AudioEncoding,
    path: impl AsRef<Path>,
) -> WaveResult<AudioSummary> {
    let path = path.as_ref();
    if !encoding.scale.is_finite() || encoding.scale <= 0.0 {
        return Err(WaveError::invalid(
            "audio_scale",
            format!("{} must be a positive finite number", encoding.scale),
        ));
    }

    // Quantize everything first so a rejected sample leaves no partial file behind.
    let mut clamped = 0;
    let mut pcm = Vec::with_capacity(waveform.len());
    for (index, &sample) in waveform.iter().enumerate() {
        let (value, was_clamped) = quantize(index, sample, encoding)?;
        clamped += usize::from(was_clamped);
        pcm.push(value);
    }

    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: sample_rate.hz(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::new(create_output(path)?, spec)?;
    for value in &pcm {
        writer.write_sample(*value)?;
    }
    writer.finalize()?;

    let logger = LogManager::new("audio");
    if clamped > 0 {
        logger.caution(&format!(
            "clamped {} of {} samples to +/-{} while writing {}",
            clamped,
            pcm.len(),
            FULL_SCALE,
            path.display()
        ));
    }
    logger.record(&format!(
        "wrote {} frames at {} to {}",
        pcm.len(),
        sample_rate,
        path.display()
    ));

    Ok(AudioSummary {
        frames: pcm.len(),
        clamped,
    })
}

/// Reads a 16-bit integer WAV file written by [`write_audio_with`].
pub fn read_audio(path: impl AsRef<Path>) -> WaveResult<DecodedAudio> {
    let path = path.as_ref();
    let reader = WavReader::new(BufReader::new(open_input(path)?))?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(WaveError::Audio(hound::Error::Unsupported));
    }
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedAudio {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        samples,
    })
}

/// WAV target.
#[derive(Debug, Clone)]
pub struct AudioSink {
    pub path: PathBuf,
    pub sample_rate: SampleRate,
    pub encoding: AudioEncoding,
}

impl AudioSink {
    pub fn new(path: impl Into<PathBuf>, sample_rate: SampleRate) -> Self {
        Self {
            path: path.into(),
            sample_rate,
            encoding: AudioEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: AudioEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl WaveSink for AudioSink {
    fn write(&self, waveform: &Waveform) -> WaveResult<()> {
        write_audio_with(waveform, self.sample_rate, &self.encoding, &self.path).map(|_| ())
    }

    fn label(&self) -> String {
        format!("wav {} @ {}", self.path.display(), self.sample_rate)
    }
}
