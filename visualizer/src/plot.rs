use anyhow::Context;
use std::path::Path;
use wavecore::export::{ChannelLayout, SampleTable};
use wavecore::SampleRate;

/// Rows read from the CSV before downsampling.
pub const MAX_ROWS: usize = 2_000;

/// Vertical range shown on every plot.
pub const AMPLITUDE_LIMIT: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub time: Vec<f32>,
    pub values: Vec<f32>,
}

impl PlotSeries {
    pub fn duration(&self) -> f32 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Maps samples onto a `width` x `height` canvas, clamping amplitude to
    /// `[-AMPLITUDE_LIMIT, AMPLITUDE_LIMIT]` with zero on the centre line.
    pub fn canvas_points(&self, width: f32, height: f32) -> Vec<(f32, f32)> {
        let span = self.duration();
        let count = self.values.len();
        self.time
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (&t, &v))| {
                let x = if span > 0.0 {
                    t / span * width
                } else if count > 1 {
                    i as f32 / (count - 1) as f32 * width
                } else {
                    0.0
                };
                let clamped = v.clamp(-AMPLITUDE_LIMIT, AMPLITUDE_LIMIT);
                let y = height / 2.0 - clamped / AMPLITUDE_LIMIT * (height / 2.0);
                (x, y)
            })
            .collect()
    }
}

/// Everything the window draws: one series for mono, two stacked for stereo.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    pub headers: Vec<String>,
    pub layout: ChannelLayout,
    pub series: Vec<PlotSeries>,
}

impl PlotModel {
    pub fn load(path: &Path, downsample: usize, sample_rate: SampleRate) -> anyhow::Result<Self> {
        let table = SampleTable::load(path, MAX_ROWS)
            .with_context(|| format!("loading samples from {}", path.display()))?;
        Self::from_table(&table, downsample, sample_rate)
    }

    pub fn from_table(
        table: &SampleTable,
        downsample: usize,
        sample_rate: SampleRate,
    ) -> anyhow::Result<Self> {
        let reduced = table
            .downsample(downsample)
            .context("downsampling sample table")?;
        let time = reduced
            .time_axis(downsample, sample_rate)
            .into_iter()
            .map(|t| t as f32)
            .collect::<Vec<_>>();

        let labels: &[&str] = match reduced.layout() {
            ChannelLayout::Mono => &["Mono Audio"],
            ChannelLayout::Stereo => &["Left Channel", "Right Channel"],
        };
        let series = labels
            .iter()
            .enumerate()
            .filter_map(|(index, label)| {
                reduced.channel(index).map(|channel| PlotSeries {
                    label: (*label).to_string(),
                    time: time.clone(),
                    values: channel.iter().map(|&v| v as f32).collect(),
                })
            })
            .collect();

        Ok(Self {
            headers: table.headers.clone(),
            layout: reduced.layout(),
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rate() -> SampleRate {
        SampleRate::new(44_100).unwrap()
    }

    #[test]
    fn mono_csv_builds_single_series() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.csv");
        let mut body = String::from("index,amplitude\n");
        for i in 0..3_000 {
            body.push_str(&format!("{},{}\n", i, (i as f64 * 0.01).sin()));
        }
        fs::write(&path, body).unwrap();

        let model = PlotModel::load(&path, 10, rate()).unwrap();
        assert_eq!(model.layout, ChannelLayout::Mono);
        assert_eq!(model.headers, vec!["index", "amplitude"]);
        assert_eq!(model.series.len(), 1);
        assert_eq!(model.series[0].label, "Mono Audio");
        assert_eq!(model.series[0].values.len(), 200);
        let expected = 200.0 * 10.0 / 44_100.0;
        assert!((model.series[0].duration() - expected).abs() < 1e-6);
    }

    #[test]
    fn stereo_csv_builds_stacked_series() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.csv");
        fs::write(&path, "index,left,right\n0,0.1,-0.1\n1,0.2,-0.2\n2,0.3,-0.3\n").unwrap();

        let model = PlotModel::load(&path, 1, rate()).unwrap();
        assert_eq!(model.layout, ChannelLayout::Stereo);
        let labels: Vec<_> = model.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Left Channel", "Right Channel"]);
        assert_eq!(model.series[1].values, vec![-0.1, -0.2, -0.3]);
    }

    #[test]
    fn zero_downsample_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.csv");
        fs::write(&path, "index,a\n0,0.0\n").unwrap();
        assert!(PlotModel::load(&path, 0, rate()).is_err());
    }

    #[test]
    fn missing_csv_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(PlotModel::load(&dir.path().join("absent.csv"), 10, rate()).is_err());
    }

    #[test]
    fn canvas_points_clamp_amplitude() {
        let series = PlotSeries {
            label: "Mono Audio".into(),
            time: vec![0.0, 0.5, 1.0],
            values: vec![0.0, 3.0, -1.0],
        };
        let points = series.canvas_points(100.0, 40.0);
        assert_eq!(points, vec![(0.0, 20.0), (50.0, 0.0), (100.0, 40.0)]);
    }
}
