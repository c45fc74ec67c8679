//! Persistence targets for finished waveforms and readers for their files.

pub mod audio;
pub mod columns;
pub mod structured;
pub mod table;

pub use audio::{
    quantize, read_audio, write_audio, write_audio_with, AudioEncoding, AudioSink, AudioSummary,
    DecodedAudio, OverflowPolicy, FULL_SCALE,
};
pub use columns::{max_cycle_deviation, pair_cycles, write_columns, ColumnSink, CyclePair};
pub use structured::{read_structured, write_structured, StructuredSink};
pub use table::{write_table, ChannelLayout, SampleTable, TableSink};

use crate::prelude::{WaveError, WaveResult};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

/// Opens an input file, reporting a missing path as [`WaveError::FileNotFound`].
pub(crate) fn open_input(path: &Path) -> WaveResult<File> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => WaveError::FileNotFound(path.to_path_buf()),
        _ => WaveError::Io(err),
    })
}

/// Creates (or truncates) an output file, creating missing parent directories.
pub(crate) fn create_output(path: &Path) -> WaveResult<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}
