//! Export module - writes extruded solids to static model files
//!
//! Only Wavefront OBJ is supported: plain text, shared vertex positions,
//! per-face-corner normal references.

mod obj;

pub use obj::{export_obj, ExportError, ExportSummary};

#[allow(unused_imports)]
pub use obj::{write_obj, ExportIndexMap};
