//! 3D viewport widget
//!
//! Draws the harmonograph curve as a line strip and, when available, the
//! extruded solid as six shaded triangle strips. Everything is painted with
//! the egui painter, so there is no depth buffer: triangles are sorted back
//! to front before they are submitted.
//!
//! ## Interaction
//!
//! - Drag to orbit the camera around the origin
//! - Scroll to zoom

use eframe::egui::{self, epaint, Color32, Pos2, Rect, Stroke};
use nalgebra::{Matrix4, Point3};

use super::camera::Camera;
use crate::geometry::ExtrudedSolid;

/// Display settings for the viewport
#[derive(Clone)]
pub struct ViewportSettings {
    /// Curve line color
    pub curve_color: Color32,
    /// Base color of the solid before shading
    pub mesh_color: Color32,
    pub background: Color32,
    /// Curve thickness in pixels
    pub line_width: f32,
    /// Keep drawing the curve on top of the solid
    pub show_curve_with_surface: bool,
    /// Light that reaches faces turned away from the camera
    pub ambient: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            curve_color: Color32::WHITE,
            mesh_color: Color32::from_rgb(90, 160, 255),
            background: Color32::from_rgb(12, 12, 18),
            line_width: 1.5,
            show_curve_with_surface: false,
            ambient: 0.25,
        }
    }
}

/// One screen-space triangle waiting to be painted
struct ScreenTriangle {
    corners: [(Pos2, Color32); 3],
    depth: f32,
}

/// Interactive 3D viewport
pub struct Viewport {
    pub settings: ViewportSettings,
    pub camera: Camera,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            settings: ViewportSettings::default(),
            camera: Camera::default(),
        }
    }

    /// Draw the viewport into all available space
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `curve` - Flat `[x, y, z, ...]` curve buffer
    /// * `solid` - Extruded solid to draw, if surface rendering is active
    pub fn show(&mut self, ui: &mut egui::Ui, curve: &[f32], solid: Option<&ExtrudedSolid>) -> egui::Response {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let rect = response.rect;

        self.handle_input(ui, &response);

        painter.rect_filled(rect, 4.0, self.settings.background);

        let view = self.camera.view_matrix();
        let aspect = (rect.width() / rect.height().max(1.0)).max(0.01);
        let view_proj = self.camera.projection_matrix(aspect) * view;
        let projector = Projector {
            camera: &self.camera,
            view,
            view_proj,
            rect,
        };

        if let Some(solid) = solid {
            self.draw_solid(&painter, &projector, solid);
        }

        if solid.is_none() || self.settings.show_curve_with_surface {
            self.draw_curve(&painter, &projector, curve);
        }

        response
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let drag = response.drag_delta();
        if drag != egui::Vec2::ZERO {
            self.camera.orbit(drag.x * 0.01, drag.y * 0.01);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom((-scroll * 0.002).exp());
            }
        }
    }

    fn draw_curve(&self, painter: &egui::Painter, projector: &Projector<'_>, curve: &[f32]) {
        let stroke = Stroke::new(self.settings.line_width, self.settings.curve_color);

        // Break the strip wherever a point falls behind the camera
        let mut run: Vec<Pos2> = Vec::new();
        for xyz in curve.chunks_exact(3) {
            match projector.to_screen(&Point3::new(xyz[0], xyz[1], xyz[2])) {
                Some((pos, _)) => run.push(pos),
                None => {
                    let finished = std::mem::take(&mut run);
                    if finished.len() >= 2 {
                        painter.add(egui::Shape::line(finished, stroke));
                    }
                }
            }
        }
        if run.len() >= 2 {
            painter.add(egui::Shape::line(run, stroke));
        }
    }

    fn draw_solid(&self, painter: &egui::Painter, projector: &Projector<'_>, solid: &ExtrudedSolid) {
        let light = self.camera.eye_direction();
        let base = self.settings.mesh_color;
        let ambient = self.settings.ambient.clamp(0.0, 1.0);

        let mut triangles = Vec::with_capacity(solid.triangle_count());
        for (_, indices, normals) in solid.groups() {
            for k in 0..indices.len().saturating_sub(2) {
                let mut corners = [(Pos2::ZERO, Color32::TRANSPARENT); 3];
                let mut depth = 0.0;
                let mut visible = true;

                for (slot, pos) in (k..k + 3).enumerate() {
                    let Some(vertex) = solid.vertices.get(indices[pos] as usize) else {
                        visible = false;
                        break;
                    };
                    let Some((screen, d)) = projector.to_screen(vertex) else {
                        visible = false;
                        break;
                    };
                    // Two-sided headlight: cap and wall orientation is not fixed
                    let diffuse = normals[pos].dot(&light).abs();
                    let shade = ambient + (1.0 - ambient) * diffuse;
                    corners[slot] = (screen, scale_color(base, shade));
                    depth += d;
                }

                if visible {
                    triangles.push(ScreenTriangle {
                        corners,
                        depth: depth / 3.0,
                    });
                }
            }
        }

        // Painter's algorithm: farthest first
        triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let mut mesh = epaint::Mesh::default();
        for tri in &triangles {
            let first = mesh.vertices.len() as u32;
            for (pos, color) in tri.corners {
                mesh.colored_vertex(pos, color);
            }
            mesh.add_triangle(first, first + 1, first + 2);
        }
        painter.add(egui::Shape::mesh(mesh));
    }
}

/// World → screen mapping for one frame
struct Projector<'a> {
    camera: &'a Camera,
    view: Matrix4<f32>,
    view_proj: Matrix4<f32>,
    rect: Rect,
}

impl Projector<'_> {
    fn to_screen(&self, p: &Point3<f32>) -> Option<(Pos2, f32)> {
        let projected = self.camera.project(&self.view_proj, &self.view, p)?;
        let center = self.rect.center();
        let pos = Pos2::new(
            center.x + projected.x * self.rect.width() * 0.5,
            // Screen Y grows downward
            center.y - projected.y * self.rect.height() * 0.5,
        );
        Some((pos, projected.depth))
    }
}

fn scale_color(color: Color32, factor: f32) -> Color32 {
    let f = factor.clamp(0.0, 1.0);
    Color32::from_rgb(
        (color.r() as f32 * f) as u8,
        (color.g() as f32 * f) as u8,
        (color.b() as f32 * f) as u8,
    )
}
