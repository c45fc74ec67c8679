//! Closed-form waveform generators.
//!
//! Each shape has a parameter struct implementing [`WaveSource`] and a named
//! free function as its entry point. The two sine constructors are kept apart
//! on purpose: frequency-based generation truncates its sample count, while
//! period-based generation is exact and keeps cycles aligned sample-for-sample.
//! [`StereoPhaseSpread`] is the one two-channel producer and yields a pair.
//!
//! [`WaveSource`]: crate::prelude::WaveSource

pub mod fill;
pub mod sine;
pub mod stereo;

pub use fill::{
    generate_alternating, generate_constant, generate_hann, generate_ramp, Alternating, Constant,
    HannWindow, Ramp,
};
pub use sine::{generate_sine_by_frequency, generate_sine_by_period, SineByFrequency, SineByPeriod};
pub use stereo::{generate_stereo_sine, StereoPhaseSpread};

use crate::prelude::{WaveError, WaveResult};

pub(crate) fn require_positive(name: &'static str, value: f64) -> WaveResult<f64> {
    if !value.is_finite() {
        return Err(WaveError::invalid(name, format!("{value} is not finite")));
    }
    if value <= 0.0 {
        return Err(WaveError::invalid(
            name,
            format!("{value} must be greater than zero"),
        ));
    }
    Ok(value)
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> WaveResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WaveError::invalid(name, format!("{value} is not finite")))
    }
}

pub(crate) fn require_nonzero(name: &'static str, value: usize) -> WaveResult<usize> {
    if value == 0 {
        Err(WaveError::invalid(name, "must be greater than zero"))
    } else {
        Ok(value)
    }
}
