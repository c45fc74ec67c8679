//! Side-by-side export of the first two cycles of a periodic waveform.
//!
//! Each record pairs sample `i` of cycle one with sample `i` of cycle two. For
//! a correctly periodic generator the two values in every record are equal.

use crate::export::structured::write_pretty_json;
use crate::prelude::{WaveError, WaveResult, WaveSink, Waveform};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used when no column output path is configured.
pub const DEFAULT_COLUMNS_FILE: &str = "sine_wave_side_by_side.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclePair {
    #[serde(rename = "Cycle One Sample Val")]
    pub first: f64,
    #[serde(rename = "Cycle Two Sample Val")]
    pub second: f64,
}

impl CyclePair {
    pub fn deviation(&self) -> f64 {
        (self.first - self.second).abs()
    }
}

/// Pairs `waveform[i]` with `waveform[i + period]` for `i` in `0..period`.
pub fn pair_cycles(waveform: &Waveform, period: usize) -> WaveResult<Vec<CyclePair>> {
    if period == 0 {
        return Err(WaveError::invalid("period", "must be greater than zero"));
    }
    let required = period.checked_mul(2).ok_or_else(|| {
        WaveError::invalid("period", format!("two cycles of {period} overflow"))
    })?;
    if waveform.len() < required {
        return Err(WaveError::InsufficientSamples {
            period,
            required,
            available: waveform.len(),
        });
    }

    let (first, rest) = waveform.split_at(period);
    Ok(first
        .iter()
        .zip(&rest[..period])
        .map(|(&first, &second)| CyclePair { first, second })
        .collect())
}

/// Largest difference between paired samples.
pub fn max_cycle_deviation(pairs: &[CyclePair]) -> f64 {
    pairs
        .iter()
        .map(CyclePair::deviation)
        .fold(0.0, f64::max)
}

pub fn write_columns(pairs: &[CyclePair], path: impl AsRef<Path>) -> WaveResult<()> {
    let path = path.as_ref();
    write_pretty_json(pairs, path)?;
    LogManager::new("columns").record(&format!(
        "wrote {} cycle pairs to {} (max deviation {:.3e})",
        pairs.len(),
        path.display(),
        max_cycle_deviation(pairs)
    ));
    Ok(())
}

/// Two-column cycle comparison target.
#[derive(Debug, Clone)]
pub struct ColumnSink {
    pub path: PathBuf,
    pub period: usize,
}

impl ColumnSink {
    pub fn new(path: impl Into<PathBuf>, period: usize) -> Self {
        Self {
            path: path.into(),
            period,
        }
    }
}

impl WaveSink for ColumnSink {
    fn write(&self, waveform: &Waveform) -> WaveResult<()> {
        let pairs = pair_cycles(waveform, self.period)?;
        write_columns(&pairs, &self.path)
    }

    fn label(&self) -> String {
        format!("columns {} (period {})", self.path.display(), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_ramp, generate_sine_by_period};
    use tempfile::tempdir;

    #[test]
    fn pairs_follow_cycle_offsets() {
        let ramp = generate_ramp(10).unwrap();
        let pairs = pair_cycles(&ramp, 4).unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], CyclePair { first: 0.0, second: 4.0 });
        assert_eq!(pairs[3], CyclePair { first: 3.0, second: 7.0 });
        assert_eq!(max_cycle_deviation(&pairs), 4.0);
    }

    #[test]
    fn short_waveform_is_rejected() {
        let wave = generate_sine_by_period(128, 1, 0.5).unwrap();
        match pair_cycles(&wave, 128) {
            Err(WaveError::InsufficientSamples {
                period,
                required,
                available,
            }) => {
                assert_eq!(period, 128);
                assert_eq!(required, 256);
                assert_eq!(available, 128);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(pair_cycles(&wave, 0).is_err());
    }

    #[test]
    fn column_file_uses_fixed_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_COLUMNS_FILE);
        let wave = Waveform::new(vec![0.25, -0.25, 0.25, -0.25]);

        ColumnSink::new(&path, 2).write(&wave).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Cycle One Sample Val\": 0.25"));
        assert!(text.contains("\"Cycle Two Sample Val\": -0.25"));
        let parsed: Vec<CyclePair> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|pair| pair.deviation() == 0.0));
    }
}
