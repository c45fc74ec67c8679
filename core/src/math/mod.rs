pub mod analysis;
pub mod fft;
pub mod stats;

pub use analysis::{find_peaks, peak_frequency, zero_crossings};
pub use fft::FftHelper;
pub use stats::StatsHelper;
