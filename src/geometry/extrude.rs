//! Extruder - thickens a ribbon into a closed six-sided solid
//!
//! ## Vertex layout
//!
//! For a ribbon of `n` vertices the solid holds `2n` vertices:
//!
//! - `0..n`   top: `ribbon[i] + e * normal[i]`
//! - `n..2n`  bottom: `ribbon[i]` unchanged
//!
//! ## Face groups
//!
//! Each group is an independent triangle strip with its own normals, so
//! faces meeting at a sharp edge never have to share a vertex normal.
//!
//! ```text
//! top          0, 1, ..., n-1
//! bottom       n, n+1, ..., 2n-1
//! front cap    0, n, 1, n+1
//! end cap      n-1, 2n-1, n-2, 2n-2
//! side wall 1  0, n, 2, n+2, 4, n+4, ...   (on-curve rail)
//! side wall 2  1, n+1, 3, n+3, ...         (offset rail)
//! ```

use nalgebra::{Point3, Vector3};

use super::normals::{strip_normals, NormalSet};

/// Smallest ribbon that can be closed with two caps
pub const MIN_RIBBON_VERTICES: usize = 4;

/// One of the six independently indexed surfaces of the solid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceGroup {
    Top,
    Bottom,
    FrontCap,
    EndCap,
    SideWall1,
    SideWall2,
}

impl FaceGroup {
    /// All groups in buffer and export order
    pub fn all() -> &'static [FaceGroup; 6] {
        &[
            FaceGroup::Top,
            FaceGroup::Bottom,
            FaceGroup::FrontCap,
            FaceGroup::EndCap,
            FaceGroup::SideWall1,
            FaceGroup::SideWall2,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FaceGroup::Top => "top",
            FaceGroup::Bottom => "bottom",
            FaceGroup::FrontCap => "front cap",
            FaceGroup::EndCap => "end cap",
            FaceGroup::SideWall1 => "side wall 1",
            FaceGroup::SideWall2 => "side wall 2",
        }
    }

    /// Whether the strip estimator's normals must be negated for this group
    pub fn inverts_normals(&self) -> bool {
        matches!(self, FaceGroup::Top)
    }

    /// Position in `FaceGroup::all()`
    pub fn slot(self) -> usize {
        match self {
            FaceGroup::Top => 0,
            FaceGroup::Bottom => 1,
            FaceGroup::FrontCap => 2,
            FaceGroup::EndCap => 3,
            FaceGroup::SideWall1 => 4,
            FaceGroup::SideWall2 => 5,
        }
    }
}

/// Normals for one face group, one entry per index of that group
pub type FaceNormalSet = NormalSet;

/// A closed solid built from a ribbon
#[derive(Clone, Debug, PartialEq)]
pub struct ExtrudedSolid {
    /// Top half followed by bottom half
    pub vertices: Vec<Point3<f32>>,
    indices: [Vec<u32>; 6],
    normals: [FaceNormalSet; 6],
}

impl ExtrudedSolid {
    /// Number of ribbon vertices the solid was built from
    pub fn ribbon_len(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Triangle-strip indices of one face group
    pub fn indices(&self, group: FaceGroup) -> &[u32] {
        &self.indices[group.slot()]
    }

    /// Normals of one face group, aligned with `indices(group)`
    pub fn normals(&self, group: FaceGroup) -> &[Vector3<f32>] {
        &self.normals[group.slot()]
    }

    /// Iterate `(group, indices, normals)` in export order
    pub fn groups(&self) -> impl Iterator<Item = (FaceGroup, &[u32], &[Vector3<f32>])> + '_ {
        FaceGroup::all()
            .iter()
            .map(move |&g| (g, self.indices(g), self.normals(g)))
    }

    /// Total triangles across all strips
    pub fn triangle_count(&self) -> usize {
        self.indices
            .iter()
            .map(|idx| idx.len().saturating_sub(2))
            .sum()
    }
}

/// Extrude `ribbon` by `distance` along its per-vertex `surface_normals`
///
/// Returns `None` for ribbons shorter than `MIN_RIBBON_VERTICES`, which
/// cannot be capped. Missing normals are treated as zero.
pub fn extrude(
    ribbon: &[Point3<f32>],
    surface_normals: &[Vector3<f32>],
    distance: f32,
) -> Option<ExtrudedSolid> {
    let n = ribbon.len();
    if n < MIN_RIBBON_VERTICES {
        return None;
    }

    let mut vertices = Vec::with_capacity(2 * n);
    vertices.extend(ribbon.iter().enumerate().map(|(i, p)| {
        let normal = surface_normals.get(i).copied().unwrap_or_else(Vector3::zeros);
        *p + normal * distance
    }));
    vertices.extend_from_slice(ribbon);

    let indices = group_indices(n);
    let normals = [0, 1, 2, 3, 4, 5].map(|slot| {
        let group = FaceGroup::all()[slot];
        strip_normals(&vertices, &indices[slot], group.inverts_normals())
    });

    Some(ExtrudedSolid {
        vertices,
        indices,
        normals,
    })
}

/// Index lists for all six groups of a solid built from `n` ribbon vertices
///
/// Slots follow `FaceGroup::all()` order.
fn group_indices(n: usize) -> [Vec<u32>; 6] {
    let n = n as u32;

    let top: Vec<u32> = (0..n).collect();
    let bottom: Vec<u32> = (n..2 * n).collect();
    let front_cap = vec![0, n, 1, n + 1];
    let end_cap = vec![n - 1, 2 * n - 1, n - 2, 2 * n - 2];
    let side_wall = |start: u32| -> Vec<u32> {
        (start..n).step_by(2).flat_map(|i| [i, i + n]).collect()
    };

    [top, bottom, front_cap, end_cap, side_wall(0), side_wall(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normals::strip_normals;
    use crate::geometry::ribbon::ribbon_indices;
    use approx::assert_relative_eq;

    /// Flat ribbon in the XY plane: rails at y = 0 and y = 1
    fn flat_ribbon(pairs: usize) -> Vec<Point3<f32>> {
        (0..pairs)
            .flat_map(|i| {
                let x = i as f32;
                [Point3::new(x, 0.0, 0.0), Point3::new(x, 1.0, 0.0)]
            })
            .collect()
    }

    fn solid(pairs: usize) -> (Vec<Point3<f32>>, ExtrudedSolid) {
        let ribbon = flat_ribbon(pairs);
        let normals = strip_normals(&ribbon, &ribbon_indices(ribbon.len()), true);
        let solid = extrude(&ribbon, &normals, 0.1).unwrap();
        (ribbon, solid)
    }

    #[test]
    fn test_vertex_layout() {
        let (ribbon, solid) = solid(5);
        let n = ribbon.len();
        assert_eq!(solid.vertices.len(), 2 * n);
        assert_eq!(solid.ribbon_len(), n);

        for i in 0..n {
            assert_relative_eq!(solid.vertices[n + i], ribbon[i]);
            let lift = solid.vertices[i] - ribbon[i];
            assert_relative_eq!(lift.norm(), 0.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_group_indices_small() {
        let idx = group_indices(6);
        assert_eq!(idx[0], vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(idx[1], vec![6, 7, 8, 9, 10, 11]);
        assert_eq!(idx[2], vec![0, 6, 1, 7]);
        assert_eq!(idx[3], vec![5, 11, 4, 10]);
        assert_eq!(idx[4], vec![0, 6, 2, 8, 4, 10]);
        assert_eq!(idx[5], vec![1, 7, 3, 9, 5, 11]);
    }

    #[test]
    fn test_index_bounds() {
        for pairs in 2..40 {
            let (ribbon, solid) = solid(pairs);
            let limit = 2 * ribbon.len() as u32;
            for (_, indices, _) in solid.groups() {
                assert!(indices.iter().all(|&i| i < limit));
            }
        }
    }

    #[test]
    fn test_caps_always_four() {
        for n in MIN_RIBBON_VERTICES..64 {
            let idx = group_indices(n);
            assert_eq!(idx[2].len(), 4);
            assert_eq!(idx[3].len(), 4);
        }
    }

    #[test]
    fn test_side_walls_cover_ribbon() {
        for n in MIN_RIBBON_VERTICES..32 {
            let idx = group_indices(n);
            // Together the two walls pair every ribbon vertex with its bottom copy
            assert_eq!(idx[4].len() + idx[5].len(), 2 * n);
            if n % 2 == 0 {
                assert_eq!(idx[4].len(), n);
                assert_eq!(idx[5].len(), n);
            }
        }
    }

    #[test]
    fn test_normals_align_with_indices() {
        let (_, solid) = solid(6);
        for (_, indices, normals) in solid.groups() {
            assert_eq!(indices.len(), normals.len());
        }
    }

    #[test]
    fn test_top_and_bottom_face_outward() {
        let (ribbon, solid) = solid(6);
        let n = ribbon.len();
        let top = solid.normals(FaceGroup::Top);
        let bottom = solid.normals(FaceGroup::Bottom);

        for i in 0..n {
            let up = solid.vertices[i] - solid.vertices[n + i];
            assert!(top[i].dot(&up) > 0.0);
            assert!(bottom[i].dot(&up) < 0.0);
            assert_relative_eq!(top[i].norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_too_short() {
        let ribbon = flat_ribbon(1);
        assert!(extrude(&ribbon, &[], 0.1).is_none());
    }

    #[test]
    fn test_triangle_count() {
        let (ribbon, solid) = solid(5);
        let n = ribbon.len();
        // top + bottom + two caps + two walls of n entries each
        assert_eq!(solid.triangle_count(), (n - 2) * 2 + 2 * 2 + (n - 2) * 2);
    }
}
