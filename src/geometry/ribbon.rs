//! Ribbon builder - turns a curve into a zero-thickness vertex strip
//!
//! The ribbon alternates between two rails:
//!
//! ```text
//! index:  0      1        2      3        4   ...
//!         c[0]   c[0]+hN  c[1]   c[1]+hN  c[2]
//! ```
//!
//! Read as a triangle strip, consecutive pairs form quads spanning the
//! on-curve rail and the offset rail.

use nalgebra::{Point3, Vector3};

/// Trailing curve points left out of the ribbon
///
/// The final point's direction falls back to its predecessor, so the tail
/// of the curve carries a reversed direction that would fold the ribbon.
pub const TAIL_CUTOFF: usize = 4;

/// Alternating (on-curve, offset) vertices
pub type RibbonVertexBuffer = Vec<Point3<f32>>;

/// Build the ribbon for `curve` using its per-point `normals`
///
/// For each `i` in `0..curve.len() - TAIL_CUTOFF` emits `curve[i]` followed by
/// `curve[i] + offset * normals[i]`, giving `2 * (curve.len() - 4)` vertices.
/// Curves of four points or fewer produce an empty ribbon.
pub fn build_ribbon(curve: &[Point3<f32>], normals: &[Vector3<f32>], offset: f32) -> RibbonVertexBuffer {
    let count = curve.len().min(normals.len()).saturating_sub(TAIL_CUTOFF);

    let mut ribbon = Vec::with_capacity(count * 2);
    for (point, normal) in curve.iter().zip(normals).take(count) {
        ribbon.push(*point);
        ribbon.push(*point + *normal * offset);
    }
    ribbon
}

/// Strip indices `[0, 1, ..., n-1]` covering a ribbon of `n` vertices
pub fn ribbon_indices(len: usize) -> Vec<u32> {
    (0..len as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normals::polyline_normals;
    use approx::assert_relative_eq;

    fn line(n: usize) -> Vec<Point3<f32>> {
        (0..n).map(|i| Point3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_ribbon_length() {
        let curve = line(10);
        let normals = polyline_normals(&curve);
        let ribbon = build_ribbon(&curve, &normals, 0.5);
        assert_eq!(ribbon.len(), 2 * (10 - 4));
    }

    #[test]
    fn test_ribbon_alternates_rails() {
        let curve = line(8);
        let normals = vec![Vector3::y(); 8];
        let ribbon = build_ribbon(&curve, &normals, 0.25);

        for i in 0..ribbon.len() / 2 {
            assert_relative_eq!(ribbon[2 * i], curve[i]);
            assert_relative_eq!(ribbon[2 * i + 1], curve[i] + Vector3::new(0.0, 0.25, 0.0));
        }
    }

    #[test]
    fn test_short_curve_is_empty() {
        for n in 0..=TAIL_CUTOFF {
            let curve = line(n);
            let normals = polyline_normals(&curve);
            assert!(build_ribbon(&curve, &normals, 1.0).is_empty());
        }
    }

    #[test]
    fn test_ribbon_indices() {
        assert_eq!(ribbon_indices(4), vec![0, 1, 2, 3]);
        assert!(ribbon_indices(0).is_empty());
    }
}
