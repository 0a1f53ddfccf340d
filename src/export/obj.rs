//! Wavefront OBJ export for extruded solids
//!
//! ## Layout
//!
//! ```text
//! v  x y z            one per solid vertex
//! vn x y z            one per index entry, groups concatenated
//! f  v//vn v//vn v//vn   one per strip triangle, group by group
//! ```
//!
//! OBJ has a single normal index space, so every group's normals are
//! appended to one buffer and `ExportIndexMap` remembers where each group
//! starts. Because group normals are aligned with group indices, the normal
//! for index position `k` of a group lives at `start + k`.
//!
//! Strips alternate winding. When flattened to discrete triangles, odd
//! triangles are written reversed so every face keeps the same orientation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::{ExtrudedSolid, FaceGroup};

/// Errors that can occur while exporting a solid
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {}: {}", path.display(), source)]
    CreateError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write OBJ data: {0}")]
    IoError(#[from] io::Error),

    #[error("No solid to export")]
    EmptySolid,
}

/// Counts of what an export wrote
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub vertices: usize,
    pub normals: usize,
    pub faces: usize,
}

/// Start offset of each face group in the concatenated normal buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportIndexMap {
    starts: [usize; 6],
    total: usize,
}

impl ExportIndexMap {
    pub fn new(solid: &ExtrudedSolid) -> Self {
        let mut starts = [0; 6];
        let mut total = 0;
        for (group, _, normals) in solid.groups() {
            starts[group.slot()] = total;
            total += normals.len();
        }
        Self { starts, total }
    }

    /// 0-based offset of the group's first normal
    pub fn start(&self, group: FaceGroup) -> usize {
        self.starts[group.slot()]
    }

    /// Length of the concatenated normal buffer
    pub fn normal_count(&self) -> usize {
        self.total
    }
}

/// Write `solid` as OBJ text to `writer`
pub fn write_obj<W: Write>(solid: &ExtrudedSolid, writer: &mut W) -> Result<ExportSummary, ExportError> {
    let map = ExportIndexMap::new(solid);

    for v in &solid.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    for (_, _, normals) in solid.groups() {
        for n in normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    let mut faces = 0;
    for (group, indices, _) in solid.groups() {
        let written = write_strip_faces(writer, indices, map.start(group))?;
        log::debug!("Wrote {} faces for {}", written, group.name());
        faces += written;
    }

    Ok(ExportSummary {
        vertices: solid.vertices.len(),
        normals: map.normal_count(),
        faces,
    })
}

/// Write one `f` line per triangle of a strip
///
/// `normal_start` is the 0-based offset of the strip's first normal.
/// Returns the number of faces written, `max(0, indices.len() - 2)`.
pub fn write_strip_faces<W: Write>(writer: &mut W, indices: &[u32], normal_start: usize) -> io::Result<usize> {
    let triangles = indices.len().saturating_sub(2);

    for k in 0..triangles {
        let corners = if k % 2 == 0 {
            [k, k + 1, k + 2]
        } else {
            [k + 2, k + 1, k]
        };

        write!(writer, "f")?;
        for pos in corners {
            // OBJ indices are 1-based
            write!(writer, " {}//{}", indices[pos] as usize + 1, normal_start + pos + 1)?;
        }
        writeln!(writer)?;
    }

    Ok(triangles)
}

/// Create (or truncate) `path` and export `solid` into it
pub fn export_obj(solid: &ExtrudedSolid, path: impl AsRef<Path>) -> Result<ExportSummary, ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::CreateError {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let summary = write_obj(solid, &mut writer)?;
    writer.flush()?;

    log::info!(
        "Exported {} vertices, {} normals, {} faces to {}",
        summary.vertices,
        summary.normals,
        summary.faces,
        path.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{sample_curve, Preset};
    use crate::geometry::{build_ribbon, extrude, polyline_normals, ribbon_indices, strip_normals};

    fn classic_solid(time: f64) -> ExtrudedSolid {
        let curve = sample_curve(&Preset::Classic.parameters(), time);
        let ribbon = build_ribbon(&curve, &polyline_normals(&curve), 0.05);
        let normals = strip_normals(&ribbon, &ribbon_indices(ribbon.len()), true);
        extrude(&ribbon, &normals, 0.02).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("harmono-rs-{}-{}.obj", std::process::id(), name))
    }

    fn lines_starting(text: &str, prefix: &str) -> usize {
        text.lines().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn test_strip_faces_four_indices() {
        let mut out = Vec::new();
        let faces = write_strip_faces(&mut out, &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(faces, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["f 1//1 2//2 3//3", "f 4//4 3//3 2//2"]);
    }

    #[test]
    fn test_strip_faces_short_lists() {
        for len in 0..3 {
            let indices: Vec<u32> = (0..len).collect();
            let mut out = Vec::new();
            assert_eq!(write_strip_faces(&mut out, &indices, 0).unwrap(), 0);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_strip_faces_normal_offset() {
        let mut out = Vec::new();
        write_strip_faces(&mut out, &[7, 9, 8], 10).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "f 8//11 10//12 9//13\n");
    }

    #[test]
    fn test_index_map_offsets() {
        let solid = classic_solid(1.0);
        let map = ExportIndexMap::new(&solid);
        let n = solid.ribbon_len();

        assert_eq!(map.start(FaceGroup::Top), 0);
        assert_eq!(map.start(FaceGroup::Bottom), n);
        assert_eq!(map.start(FaceGroup::FrontCap), 2 * n);
        assert_eq!(map.start(FaceGroup::EndCap), 2 * n + 4);
        assert_eq!(map.start(FaceGroup::SideWall1), 2 * n + 8);
        assert_eq!(map.start(FaceGroup::SideWall2), 3 * n + 8);
        assert_eq!(map.normal_count(), 4 * n + 8);
    }

    #[test]
    fn test_line_counts() {
        let solid = classic_solid(1.0);
        let mut out = Vec::new();
        let summary = write_obj(&solid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(lines_starting(&text, "v "), solid.vertices.len());
        assert_eq!(lines_starting(&text, "vn "), summary.normals);
        assert_eq!(lines_starting(&text, "f "), summary.faces);
        assert_eq!(summary.faces, solid.triangle_count());

        let expected: usize = solid
            .groups()
            .map(|(_, indices, _)| indices.len().saturating_sub(2))
            .sum();
        assert_eq!(summary.faces, expected);
    }

    #[test]
    fn test_face_indices_in_range() {
        let solid = classic_solid(0.6);
        let mut out = Vec::new();
        let summary = write_obj(&solid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for corner in line.split_whitespace().skip(1) {
                let (v, vn) = corner.split_once("//").unwrap();
                let v: usize = v.parse().unwrap();
                let vn: usize = vn.parse().unwrap();
                assert!(v >= 1 && v <= summary.vertices);
                assert!(vn >= 1 && vn <= summary.normals);
            }
        }
    }

    #[test]
    fn test_reexport_is_identical() {
        let solid = classic_solid(1.5);
        let first = temp_path("reexport-a");
        let second = temp_path("reexport-b");

        export_obj(&solid, &first).unwrap();
        export_obj(&solid, &second).unwrap();

        let a = std::fs::read(&first).unwrap();
        let b = std::fs::read(&second).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);

        let _ = std::fs::remove_file(first);
        let _ = std::fs::remove_file(second);
    }

    #[test]
    fn test_export_truncates() {
        let path = temp_path("truncate");
        std::fs::write(&path, "x".repeat(1 << 20)).unwrap();

        let solid = classic_solid(0.3);
        export_obj(&solid, &path).unwrap();

        let mut expected = Vec::new();
        write_obj(&solid, &mut expected).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), expected);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_export_loads_with_tobj() {
        let solid = classic_solid(1.0);
        let path = temp_path("tobj");
        let summary = export_obj(&solid, &path).unwrap();

        let (models, _) = tobj::load_obj(
            &path,
            &tobj::LoadOptions {
                single_index: false,
                triangulate: false,
                ..Default::default()
            },
        )
        .unwrap();

        let faces: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
        assert_eq!(faces, summary.faces);
        let normal_refs: usize = models.iter().map(|m| m.mesh.normal_indices.len()).sum();
        assert_eq!(normal_refs, 3 * summary.faces);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_create_failure_is_reported() {
        let solid = classic_solid(0.3);
        let path = std::env::temp_dir()
            .join("harmono-rs-missing-dir")
            .join("nested")
            .join("out.obj");

        match export_obj(&solid, &path) {
            Err(ExportError::CreateError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CreateError, got {:?}", other),
        }
    }
}
