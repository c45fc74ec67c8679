use crate::workflow::config::JobConfig;
use anyhow::Context;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use wavecore::export::{write_table, AudioSink, ColumnSink, StructuredSink, TableSink};
use wavecore::generator::StereoPhaseSpread;
use wavecore::math::{peak_frequency, zero_crossings, FftHelper, StatsHelper};
use wavecore::{WaveSink, Waveform};

#[derive(Debug)]
pub struct JobReport {
    pub label: String,
    pub sample_count: usize,
    pub peak: f64,
    pub rms: f64,
    pub zero_crossings: usize,
    pub peak_frequency: Option<f64>,
    pub spectral_frequency: Option<f64>,
    pub written: Vec<PathBuf>,
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = |value: Option<f64>| {
            value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
        };
        write!(
            f,
            "{} -> samples={} peak={:.4} rms={:.4} zero_crossings={} peak_hz={} spectral_hz={} outputs={:?}",
            self.label,
            self.sample_count,
            self.peak,
            self.rms,
            self.zero_crossings,
            hz(self.peak_frequency),
            hz(self.spectral_frequency),
            self.written
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    config: JobConfig,
}

impl Runner {
    pub fn new(config: JobConfig) -> Self {
        Self { config }
    }

    fn sinks(&self) -> anyhow::Result<Vec<(PathBuf, Box<dyn WaveSink>)>> {
        let outputs = &self.config.outputs;
        let mut sinks: Vec<(PathBuf, Box<dyn WaveSink>)> = Vec::new();

        if let Some(path) = &outputs.structured {
            sinks.push((path.clone(), Box::new(StructuredSink::new(path))));
        }
        if let Some(path) = &outputs.columns {
            sinks.push((
                path.clone(),
                Box::new(ColumnSink::new(path, self.config.period)),
            ));
        }
        if let Some(path) = &outputs.audio {
            let sink = AudioSink::new(path, self.config.sample_rate()?)
                .with_encoding(self.config.encoding());
            sinks.push((path.clone(), Box::new(sink)));
        }
        if let Some(path) = &outputs.table {
            sinks.push((path.clone(), Box::new(TableSink::new(path))));
        }
        Ok(sinks)
    }

    pub fn generate(&self) -> anyhow::Result<(String, Waveform)> {
        let source = self.config.to_source()?;
        let label = source.label();
        let waveform = source
            .generate()
            .with_context(|| format!("generating {label}"))?;
        Ok((label, waveform))
    }

    /// Writes the stereo phase-spread pair, one frame per generated sample.
    fn write_stereo(&self, frames: usize, path: &Path) -> anyhow::Result<()> {
        let stereo = StereoPhaseSpread::new(frames).with_amplitude(self.config.amplitude);
        let (left, right) = stereo
            .generate_pair()
            .with_context(|| format!("generating {}", stereo.label()))?;
        write_table(path, &[&left, &right])
            .with_context(|| format!("writing stereo csv {}", path.display()))?;
        Ok(())
    }

    pub fn execute(&self) -> anyhow::Result<JobReport> {
        let (label, waveform) = self.generate()?;
        info!("generated {} ({} samples)", label, waveform.len());

        let mut written = Vec::new();
        for (path, sink) in self.sinks()? {
            sink.write(&waveform)
                .with_context(|| format!("writing {}", sink.label()))?;
            written.push(path);
        }
        if let Some(path) = &self.config.outputs.stereo_table {
            self.write_stereo(waveform.len(), path)?;
            written.push(path.clone());
        }

        let sample_rate = self.config.sample_rate()?;
        Ok(JobReport {
            label,
            sample_count: waveform.len(),
            peak: StatsHelper::peak_abs(&waveform),
            rms: StatsHelper::rms(&waveform),
            zero_crossings: zero_crossings(&waveform),
            peak_frequency: peak_frequency(&waveform, sample_rate),
            spectral_frequency: FftHelper::dominant_frequency(&waveform, sample_rate),
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::{OutputPaths, WaveShape};
    use tempfile::tempdir;
    use wavecore::export::{read_audio, read_structured, ChannelLayout, SampleTable};

    #[test]
    fn runner_writes_every_configured_output() {
        let dir = tempdir().unwrap();
        let outputs = OutputPaths {
            structured: Some(dir.path().join("sine.json")),
            columns: Some(dir.path().join("columns.json")),
            audio: Some(dir.path().join("sine.wav")),
            table: Some(dir.path().join("sine.csv")),
            stereo_table: Some(dir.path().join("stereo.csv")),
        };
        let cfg = JobConfig {
            outputs: outputs.clone(),
            ..Default::default()
        };

        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(report.sample_count, 256);
        assert_eq!(report.written.len(), 5);
        assert!(report.peak <= 0.5);

        let structured = read_structured(outputs.structured.unwrap()).unwrap();
        assert_eq!(structured.len(), 256);
        let audio = read_audio(outputs.audio.unwrap()).unwrap();
        assert_eq!(audio.sample_rate, 44_100);
        assert_eq!(audio.channels, 1);
        let table = SampleTable::load(outputs.table.unwrap(), 2_000).unwrap();
        assert_eq!(table.rows(), 256);
        let stereo = SampleTable::load(outputs.stereo_table.unwrap(), 2_000).unwrap();
        assert_eq!(stereo.layout(), ChannelLayout::Stereo);
        assert_eq!(stereo.rows(), 256);
    }

    #[test]
    fn stereo_table_right_channel_crosses_twice_as_often() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.csv");
        let cfg = JobConfig {
            shape: WaveShape::Hann,
            length: Some(1_001),
            outputs: OutputPaths {
                stereo_table: Some(path.clone()),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(report.written, vec![path.clone()]);

        let table = SampleTable::load(&path, 2_000).unwrap();
        assert_eq!(table.headers, vec!["index", "channel_1", "channel_2"]);
        assert_eq!(table.rows(), 1_001);
        let left = table.channel(0).unwrap().to_vec();
        let right = table.channel(1).unwrap().to_vec();
        assert!(StatsHelper::peak_abs(&left) <= 0.5);
        assert_eq!(zero_crossings(&left), 2);
        assert_eq!(zero_crossings(&right), 2 * zero_crossings(&left));
    }

    #[test]
    fn runner_surfaces_column_precondition() {
        let dir = tempdir().unwrap();
        let cfg = JobConfig {
            shape: WaveShape::Ramp,
            length: Some(100),
            period: 64,
            outputs: OutputPaths {
                columns: Some(dir.path().join("columns.json")),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("insufficient samples"));
    }

    #[test]
    fn frequency_job_reports_measured_frequency() {
        let cfg = JobConfig {
            shape: WaveShape::SineByFrequency,
            cycles: 5.0,
            frequency: 440.0,
            outputs: OutputPaths::default(),
            ..Default::default()
        };

        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(report.sample_count, 501);
        assert_eq!(report.zero_crossings, 10);
        let measured = report.peak_frequency.unwrap();
        assert!((439.0..=441.0).contains(&measured));
        assert!(report.written.is_empty());
    }
}
