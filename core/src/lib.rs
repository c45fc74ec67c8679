//! Core waveform toolkit for generating synthetic test signals.
//!
//! Generators produce immutable [`Waveform`]s, exporters persist them as JSON,
//! 16-bit PCM WAV or CSV, and the math helpers verify their shape.

pub mod export;
pub mod generator;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use prelude::{SampleRate, WaveError, WaveResult, WaveSink, WaveSource, Waveform};
