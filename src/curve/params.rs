//! Harmonograph parameters and named presets
//!
//! A harmonograph traces the motion of damped pendulums. Each axis is
//! driven by two oscillators, so a curve is fully described by an
//! amplitude plus six `Oscillator`s:
//!
//! ```text
//! axis(t) = A·sin(f₁·t + p₁)·e^(-d₁·t) + A·sin(f₂·t + p₂)·e^(-d₂·t)
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// One damped sinusoidal oscillator
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Angular frequency (radians per unit time)
    pub frequency: f64,
    /// Exponential decay rate (0 = no decay)
    pub damping: f64,
    /// Phase offset in radians
    pub phase: f64,
}

impl Oscillator {
    pub const fn new(frequency: f64, damping: f64, phase: f64) -> Self {
        Self {
            frequency,
            damping,
            phase,
        }
    }

    /// Contribution of this oscillator at time `t` for the given amplitude
    #[inline]
    pub fn evaluate(&self, amplitude: f64, t: f64) -> f64 {
        amplitude * (t * self.frequency + self.phase).sin() * (-self.damping * t).exp()
    }
}

/// Coordinate axis driven by a pair of oscillators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn all() -> &'static [Axis] {
        &[Axis::X, Axis::Y, Axis::Z]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Full description of a harmonograph curve
///
/// Oscillators are stored grouped by axis: `oscillators[0]` drives X,
/// `oscillators[1]` drives Y, `oscillators[2]` drives Z. The type makes
/// "exactly six, two per axis" impossible to violate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    pub amplitude: f64,
    pub oscillators: [[Oscillator; 2]; 3],
}

impl Default for CurveParameters {
    fn default() -> Self {
        Preset::Classic.parameters()
    }
}

impl CurveParameters {
    /// The oscillator pair driving one axis
    pub fn axis(&self, axis: Axis) -> &[Oscillator; 2] {
        &self.oscillators[axis.index()]
    }

    /// Mutable access to the oscillator pair driving one axis (for UI binding)
    pub fn axis_mut(&mut self, axis: Axis) -> &mut [Oscillator; 2] {
        &mut self.oscillators[axis.index()]
    }

    /// Evaluate one axis at time `t`
    #[inline]
    pub fn evaluate_axis(&self, axis: Axis, t: f64) -> f64 {
        let [first, second] = self.axis(axis);
        first.evaluate(self.amplitude, t) + second.evaluate(self.amplitude, t)
    }
}

/// Hard-coded parameter tables selectable from the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Classic,
    Rosette,
    Spindle,
    Knot,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Classic, Preset::Rosette, Preset::Spindle, Preset::Knot]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Rosette => "Rosette",
            Preset::Spindle => "Spindle",
            Preset::Knot => "Knot",
        }
    }

    /// The parameter table for this preset
    pub fn parameters(&self) -> CurveParameters {
        match self {
            Preset::Classic => CurveParameters {
                amplitude: 0.5,
                oscillators: [
                    [
                        Oscillator::new(3.001, 0.004, 0.0),
                        Oscillator::new(2.0, 0.0065, 0.0),
                    ],
                    [
                        Oscillator::new(3.0, 0.008, PI / 2.0),
                        Oscillator::new(2.0, 0.019, 3.0 * PI / 2.0),
                    ],
                    [
                        Oscillator::new(3.0, 0.012, PI / 4.0),
                        Oscillator::new(2.0, 0.005, 2.0 * PI),
                    ],
                ],
            },
            // Near-unison pairs beat slowly against each other
            Preset::Rosette => CurveParameters {
                amplitude: 0.45,
                oscillators: [
                    [
                        Oscillator::new(2.0, 0.003, 0.0),
                        Oscillator::new(2.01, 0.004, PI / 2.0),
                    ],
                    [
                        Oscillator::new(2.0, 0.003, PI / 2.0),
                        Oscillator::new(2.01, 0.004, PI),
                    ],
                    [
                        Oscillator::new(1.0, 0.01, 0.0),
                        Oscillator::new(3.0, 0.02, PI / 3.0),
                    ],
                ],
            },
            Preset::Spindle => CurveParameters {
                amplitude: 0.5,
                oscillators: [
                    [
                        Oscillator::new(3.0, 0.002, 0.0),
                        Oscillator::new(1.0, 0.01, PI / 6.0),
                    ],
                    [
                        Oscillator::new(3.0, 0.002, PI / 2.0),
                        Oscillator::new(1.0, 0.01, 2.0 * PI / 3.0),
                    ],
                    [
                        Oscillator::new(0.5, 0.001, 0.0),
                        Oscillator::new(0.0, 0.0, 0.0),
                    ],
                ],
            },
            Preset::Knot => CurveParameters {
                amplitude: 0.4,
                oscillators: [
                    [
                        Oscillator::new(2.0, 0.006, 0.0),
                        Oscillator::new(5.0, 0.008, PI / 4.0),
                    ],
                    [
                        Oscillator::new(3.0, 0.006, PI / 2.0),
                        Oscillator::new(5.0, 0.008, 3.0 * PI / 4.0),
                    ],
                    [
                        Oscillator::new(5.0, 0.006, 0.0),
                        Oscillator::new(2.0, 0.012, PI),
                    ],
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic() {
        assert_eq!(CurveParameters::default(), Preset::Classic.parameters());
    }

    #[test]
    fn test_axis_grouping() {
        let params = Preset::Classic.parameters();
        assert_eq!(params.axis(Axis::X)[0].frequency, 3.001);
        assert_eq!(params.axis(Axis::Y)[1].damping, 0.019);
        assert_eq!(params.axis(Axis::Z)[0].phase, PI / 4.0);
    }

    #[test]
    fn test_oscillator_at_zero() {
        let osc = Oscillator::new(3.0, 0.5, PI / 2.0);
        assert!((osc.evaluate(2.0, 0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_presets_are_distinct() {
        let all = Preset::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.parameters(), b.parameters());
            }
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = Preset::Knot.parameters();
        let json = serde_json::to_string(&params).unwrap();
        let back: CurveParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
