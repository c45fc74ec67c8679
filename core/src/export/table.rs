//! Comma-separated sample tables.
//!
//! Layout: a header row, then one row per sample whose first column is the
//! sample index and whose remaining columns are amplitude channels.

use crate::export::{create_output, open_input};
use crate::prelude::{SampleRate, WaveError, WaveResult, WaveSink, Waveform};
use crate::telemetry::log::LogManager;
use ndarray::{s, Array2, ArrayView1, Axis};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

/// Writes one or two equally long channels as an indexed CSV table.
pub fn write_table(path: impl AsRef<Path>, channels: &[&Waveform]) -> WaveResult<()> {
    let path = path.as_ref();
    let rows = match channels {
        [mono] => mono.len(),
        [left, right] if left.len() == right.len() => left.len(),
        [left, right] => {
            return Err(WaveError::invalid(
                "channels",
                format!("lengths differ ({} vs {})", left.len(), right.len()),
            ))
        }
        _ => {
            return Err(WaveError::invalid(
                "channels",
                format!("expected 1 or 2 channels, got {}", channels.len()),
            ))
        }
    };

    let mut writer = csv::Writer::from_writer(create_output(path)?);
    let header = (1..=channels.len()).map(|n| format!("channel_{n}"));
    writer
        .write_record(std::iter::once("index".to_string()).chain(header))
        .map_err(table_error)?;
    for row in 0..rows {
        let cells = channels.iter().map(|channel| channel[row].to_string());
        writer
            .write_record(std::iter::once(row.to_string()).chain(cells))
            .map_err(table_error)?;
    }
    writer.flush()?;

    LogManager::new("table").record(&format!(
        "wrote {} rows x {} channels to {}",
        rows,
        channels.len(),
        path.display()
    ));
    Ok(())
}

fn table_error(err: csv::Error) -> WaveError {
    let line = err.position().map_or(1, |pos| pos.line() as usize);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => WaveError::Io(io),
        _ => WaveError::MalformedTable { line, reason },
    }
}

/// Samples loaded from a CSV table, one row per sample and one column per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    pub headers: Vec<String>,
    data: Array2<f64>,
}

impl SampleTable {
    pub fn from_rows(headers: Vec<String>, data: Array2<f64>) -> Self {
        Self { headers, data }
    }

    /// Loads at most `max_rows` sample rows from `path`.
    pub fn load(path: impl AsRef<Path>, max_rows: usize) -> WaveResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(open_input(path)?);

        let headers = reader
            .headers()
            .map_err(table_error)?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if headers.is_empty() {
            return Err(WaveError::MalformedTable {
                line: 1,
                reason: "missing header row".into(),
            });
        }
        let channels = headers.len() - 1;
        if channels == 0 {
            return Err(WaveError::MalformedTable {
                line: 1,
                reason: "header has no amplitude column".into(),
            });
        }

        let mut values = Vec::new();
        let mut rows = 0;
        for record in reader.records().take(max_rows) {
            let record = record.map_err(table_error)?;
            let line = record.position().map_or(rows + 2, |pos| pos.line() as usize);
            if record.len() != headers.len() {
                return Err(WaveError::MalformedTable {
                    line,
                    reason: format!("expected {} cells, found {}", headers.len(), record.len()),
                });
            }
            for cell in record.iter().skip(1) {
                let value = cell.parse::<f64>().map_err(|err| WaveError::MalformedTable {
                    line,
                    reason: format!("`{cell}`: {err}"),
                })?;
                values.push(value);
            }
            rows += 1;
        }

        let data = Array2::from_shape_vec((rows, channels), values).map_err(|err| {
            WaveError::MalformedTable {
                line: rows + 1,
                reason: err.to_string(),
            }
        })?;
        LogManager::new("table").detail(&format!(
            "loaded {} rows x {} channels from {}",
            rows,
            channels,
            path.display()
        ));
        Ok(Self { headers, data })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn channels(&self) -> usize {
        self.data.ncols()
    }

    pub fn layout(&self) -> ChannelLayout {
        if self.channels() >= 2 {
            ChannelLayout::Stereo
        } else {
            ChannelLayout::Mono
        }
    }

    pub fn channel(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.channels()).then(|| self.data.index_axis(Axis(1), index))
    }

    /// Keeps every `factor`-th row, starting with the first.
    pub fn downsample(&self, factor: usize) -> WaveResult<Self> {
        if factor == 0 {
            return Err(WaveError::invalid("downsample", "must be greater than zero"));
        }
        let step = isize::try_from(factor)
            .map_err(|_| WaveError::invalid("downsample", format!("{factor} is too large")))?;
        Ok(Self {
            headers: self.headers.clone(),
            data: self.data.slice(s![..;step, ..]).to_owned(),
        })
    }

    /// Time in seconds for each row of a table downsampled by `factor`.
    ///
    /// Spans `0..=rows * factor / sample_rate` with evenly spaced points.
    pub fn time_axis(&self, factor: usize, sample_rate: SampleRate) -> Vec<f64> {
        let rows = self.rows();
        let duration = (rows * factor) as f64 / sample_rate.as_f64();
        match rows {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let step = duration / (rows - 1) as f64;
                (0..rows).map(|i| i as f64 * step).collect()
            }
        }
    }
}

/// CSV target for a mono waveform.
#[derive(Debug, Clone)]
pub struct TableSink {
    pub path: PathBuf,
}

impl TableSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WaveSink for TableSink {
    fn write(&self, waveform: &Waveform) -> WaveResult<()> {
        write_table(&self.path, &[waveform])
    }

    fn label(&self) -> String {
        format!("csv {}", self.path.display())
    }
}
