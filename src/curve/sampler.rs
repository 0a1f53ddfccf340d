//! Curve sampler - evaluates the harmonograph over a time range
//!
//! The curve is regenerated from `t = 0` on every call. Sample `i` is
//! evaluated at `t = i * SAMPLE_STEP` rather than by accumulating the step,
//! so a longer run always starts with exactly the points of a shorter one.

use nalgebra::Point3;

use super::params::{Axis, CurveParameters};

/// Time between consecutive curve samples
pub const SAMPLE_STEP: f64 = 0.01;

/// Ordered curve points, in increasing time order
pub type Curve = Vec<Point3<f32>>;

/// Number of samples `sample_curve` produces for `animation_time`
pub fn sample_count(animation_time: f64) -> usize {
    if !animation_time.is_finite() || animation_time <= 0.0 {
        return 0;
    }
    let mut count = (animation_time / SAMPLE_STEP).floor() as usize;
    // Division can land one either side of the exact boundary
    while count as f64 * SAMPLE_STEP >= animation_time && count > 0 {
        count -= 1;
    }
    while (count as f64 * SAMPLE_STEP) < animation_time {
        count += 1;
    }
    count
}

/// Evaluate the curve at a single time value
pub fn evaluate(params: &CurveParameters, t: f64) -> Point3<f32> {
    Point3::new(
        params.evaluate_axis(Axis::X, t) as f32,
        params.evaluate_axis(Axis::Y, t) as f32,
        params.evaluate_axis(Axis::Z, t) as f32,
    )
}

/// Sample the curve for every `t` in `[0, animation_time)` at `SAMPLE_STEP`
///
/// `animation_time <= 0` yields an empty curve.
pub fn sample_curve(params: &CurveParameters, animation_time: f64) -> Curve {
    let count = sample_count(animation_time);
    (0..count)
        .map(|i| evaluate(params, i as f64 * SAMPLE_STEP))
        .collect()
}

/// Flatten a curve into `[x, y, z, x, y, z, ...]` for line-strip drawing
pub fn flatten(curve: &[Point3<f32>]) -> Vec<f32> {
    curve.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}
