//! Normal estimation for polylines and triangle strips
//!
//! Two estimators live here:
//!
//! - `polyline_normals` gives each curve point the unit direction towards its
//!   successor. The final point has no successor and points back at its
//!   predecessor instead.
//! - `strip_normals` accumulates area-weighted face normals over an indexed
//!   triangle strip. The cross product magnitude is twice the triangle's area,
//!   so larger triangles pull harder on the shared vertex normal.
//!
//! Degenerate input (coincident points, zero-area triangles) produces zero
//! vectors rather than NaN.

use nalgebra::{Point3, Vector3};

/// Unit vectors, index-aligned with the sequence they were estimated from
pub type NormalSet = Vec<Vector3<f32>>;

/// Squared length below which a vector is treated as zero
const DEGENERATE_EPSILON: f32 = 1e-20;

/// Normalize, mapping zero-length input to the zero vector
#[inline]
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len_sq = v.norm_squared();
    if len_sq > DEGENERATE_EPSILON && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        Vector3::zeros()
    }
}

/// Per-point direction along an ordered polyline
///
/// Point `i` gets `normalize(points[i + 1] - points[i])`; the last point
/// uses `normalize(points[i - 1] - points[i])`. A single point has no
/// neighbour and gets the zero vector.
pub fn polyline_normals(points: &[Point3<f32>]) -> NormalSet {
    let n = points.len();
    (0..n)
        .map(|i| {
            let neighbour = if i + 1 < n {
                i + 1
            } else if i > 0 {
                i - 1
            } else {
                return Vector3::zeros();
            };
            normalize_or_zero(points[neighbour] - points[i])
        })
        .collect()
}

/// Smooth normals for an indexed triangle strip
///
/// Every window `(idx[i], idx[i + 1], idx[i + 2])` is one triangle. Its
/// unnormalized normal `cross(v1 - v0, v2 - v0)` is added to each of its
/// three vertices, flipped first if it points away from what that vertex has
/// accumulated so far. Strips alternate winding, so without the flip every
/// other triangle would cancel its neighbour. The triangle as a whole is
/// first oriented against the summed accumulators of its corners, so a
/// vertex seen for the first time inherits the orientation of the strip.
///
/// The result has one entry per *index*, not per vertex: entry `k` is the
/// normal of vertex `indices[k]`. Callers addressing normals by position in
/// the index list (the OBJ exporter) rely on this. With `invert` set every
/// normal is negated.
///
/// Indices outside `vertices` are skipped.
pub fn strip_normals(vertices: &[Point3<f32>], indices: &[u32], invert: bool) -> NormalSet {
    let mut accum: Vec<Vector3<f32>> = vec![Vector3::zeros(); vertices.len()];

    for tri in indices.windows(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }

        let v0 = vertices[a];
        let mut face = (vertices[b] - v0).cross(&(vertices[c] - v0));

        // Orient the triangle against what its corners already agree on
        let reference = accum[a] + accum[b] + accum[c];
        if reference.dot(&face) < 0.0 {
            face = -face;
        }

        for vi in [a, b, c] {
            if accum[vi].dot(&face) < 0.0 {
                accum[vi] -= face;
            } else {
                accum[vi] += face;
            }
        }
    }

    let sign = if invert { -1.0 } else { 1.0 };
    indices
        .iter()
        .map(|&i| {
            accum
                .get(i as usize)
                .map(|n| normalize_or_zero(*n) * sign)
                .unwrap_or_else(Vector3::zeros)
        })
        .collect()
}
