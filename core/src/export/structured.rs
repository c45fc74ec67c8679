use crate::export::{create_output, open_input};
use crate::prelude::{WaveResult, WaveSink, Waveform};
use crate::telemetry::log::LogManager;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Serializes `value` as four-space indented JSON.
pub(crate) fn write_pretty_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> WaveResult<()> {
    let mut writer = create_output(path)?;
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the full sample sequence as an indented JSON list of floats.
pub fn write_structured(waveform: &Waveform, path: impl AsRef<Path>) -> WaveResult<()> {
    let path = path.as_ref();
    write_pretty_json(waveform, path)?;
    LogManager::new("structured").record(&format!(
        "wrote {} samples to {}",
        waveform.len(),
        path.display()
    ));
    Ok(())
}

/// Reads back a list written by [`write_structured`].
pub fn read_structured(path: impl AsRef<Path>) -> WaveResult<Waveform> {
    let reader = BufReader::new(open_input(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}

/// JSON list target.
#[derive(Debug, Clone)]
pub struct StructuredSink {
    pub path: PathBuf,
}

impl StructuredSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WaveSink for StructuredSink {
    fn write(&self, waveform: &Waveform) -> WaveResult<()> {
        write_structured(waveform, &self.path)
    }

    fn label(&self) -> String {
        format!("json {}", self.path.display())
    }
}
