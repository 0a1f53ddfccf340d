//! Curve module - harmonograph parameters and sampling
//!
//! This module provides:
//! - `Oscillator` and `CurveParameters`, grouped two oscillators per axis
//! - Named `Preset` parameter tables
//! - `sample_curve` for turning parameters into an ordered point sequence

mod params;
mod sampler;

pub use params::{Axis, CurveParameters, Preset};
pub use sampler::{flatten, sample_curve, Curve, SAMPLE_STEP};

#[allow(unused_imports)]
pub use params::Oscillator;
#[allow(unused_imports)]
pub use sampler::{evaluate, sample_count};
