//! Frame pipeline - curve → ribbon → solid → (optional) export
//!
//! Everything is regenerated from scratch on every frame. The only state
//! carried between frames is the animation clock, the live curve parameters,
//! the pipeline configuration and a pending export request.
//!
//! ## Export requests
//!
//! `request_export` arms a one-shot request. The next `run_frame` consumes it
//! whether or not the export succeeds, so a request is honoured at most once.
//! Requesting again before that frame replaces the pending path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::curve::{flatten, sample_curve, Curve, CurveParameters, SAMPLE_STEP};
use crate::export::{export_obj, ExportError, ExportSummary};
use crate::geometry::{
    build_ribbon, extrude, polyline_normals, ribbon_indices, strip_normals, ExtrudedSolid,
};

/// Upper bound on the animation clock
///
/// Keeps the per-frame curve (and everything derived from it) bounded.
pub const MAX_ANIMATION_TIME: f64 = 120.0;

/// Tunable geometry and animation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Distance between the ribbon's two rails
    pub ribbon_offset: f32,
    /// Thickness the ribbon is extruded to
    pub extrusion: f32,
    /// Animation clock multiplier (1.0 = one sample step per frame)
    pub animation_speed: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ribbon_offset: 0.05,
            extrusion: 0.02,
            animation_speed: 1.0,
        }
    }
}

/// What one pipeline pass produced
pub struct FrameOutput {
    /// The sampled curve, always present
    pub curve: Curve,
    /// The extruded solid, when surface rendering is active (or an export
    /// needed it) and the curve was long enough
    pub solid: Option<ExtrudedSolid>,
    /// Outcome of the export consumed this frame, if one was pending
    pub export: Option<Result<ExportSummary, ExportError>>,
}

impl FrameOutput {
    /// Curve as a flat `[x, y, z, ...]` buffer for line-strip drawing
    pub fn curve_buffer(&self) -> Vec<f32> {
        flatten(&self.curve)
    }
}

/// State owned by the control thread and fed through the pipeline each frame
pub struct FrameState {
    pub params: CurveParameters,
    pub config: PipelineConfig,
    pub is_animating: bool,
    animation_time: f64,
    export_request: Option<PathBuf>,
    /// Whether the previous surface pass produced a solid (for log edges)
    surface_ready: bool,
}

impl FrameState {
    pub fn new(params: CurveParameters, config: PipelineConfig) -> Self {
        Self {
            params,
            config,
            is_animating: true,
            animation_time: 0.0,
            export_request: None,
            surface_ready: false,
        }
    }

    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    /// Jump the clock, clamped to `[0, MAX_ANIMATION_TIME]`
    pub fn set_animation_time(&mut self, time: f64) {
        self.animation_time = if time.is_finite() {
            time.clamp(0.0, MAX_ANIMATION_TIME)
        } else {
            0.0
        };
    }

    /// Restart the curve from `t = 0`
    pub fn reset(&mut self) {
        self.animation_time = 0.0;
    }

    /// The solid is built and drawn only while the curve is paused
    pub fn render_surface(&self) -> bool {
        !self.is_animating
    }

    /// Advance the clock by one frame if animating
    pub fn tick(&mut self) {
        if self.is_animating {
            let step = self.config.animation_speed.max(0.0) * SAMPLE_STEP;
            self.set_animation_time(self.animation_time + step);
        }
    }

    /// Arm a one-shot export to `path`
    pub fn request_export(&mut self, path: impl Into<PathBuf>) {
        self.export_request = Some(path.into());
    }

    pub fn export_pending(&self) -> bool {
        self.export_request.is_some()
    }

    /// Run sample → normals → ribbon → extrude → export once
    pub fn run_frame(&mut self) -> FrameOutput {
        let curve = sample_curve(&self.params, self.animation_time);

        let export_path = self.export_request.take();
        let solid = if self.render_surface() || export_path.is_some() {
            self.build_solid(&curve)
        } else {
            None
        };

        let export = export_path.map(|path| {
            let result = match &solid {
                Some(solid) => export_obj(solid, &path),
                None => Err(ExportError::EmptySolid),
            };
            if let Err(e) = &result {
                log::error!("Export to {} failed: {}", path.display(), e);
            }
            result
        });

        FrameOutput {
            curve,
            solid,
            export,
        }
    }

    fn build_solid(&mut self, curve: &[nalgebra::Point3<f32>]) -> Option<ExtrudedSolid> {
        let curve_normals = polyline_normals(curve);
        let ribbon = build_ribbon(curve, &curve_normals, self.config.ribbon_offset);

        // Extrude against the ribbon's strip normal so the top group's
        // inverted normals and the bottom group's normals both face outward
        let surface_normals = strip_normals(&ribbon, &ribbon_indices(ribbon.len()), true);
        let solid = extrude(&ribbon, &surface_normals, self.config.extrusion);

        if solid.is_none() && self.surface_ready {
            log::debug!("Curve too short to extrude ({} points)", curve.len());
        }
        self.surface_ready = solid.is_some();
        solid
    }
}
