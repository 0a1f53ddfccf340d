//! Geometry module - from curve to closed solid
//!
//! This module provides:
//! - Normal estimation for polylines and triangle strips
//! - The ribbon builder (curve → zero-thickness strip)
//! - The extruder (ribbon → six-group solid)

mod extrude;
mod normals;
mod ribbon;

pub use extrude::{extrude, ExtrudedSolid, FaceGroup};
pub use normals::{polyline_normals, strip_normals};
pub use ribbon::{build_ribbon, ribbon_indices};

#[allow(unused_imports)]
pub use extrude::{FaceNormalSet, MIN_RIBBON_VERTICES};
#[allow(unused_imports)]
pub use normals::NormalSet;
#[allow(unused_imports)]
pub use ribbon::{RibbonVertexBuffer, TAIL_CUTOFF};
