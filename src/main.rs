//! harmono-rs - Harmonograph Ribbon Generator
//!
//! Traces a damped three-axis harmonograph curve, thickens it into a
//! closed ribbon solid and exports that solid as a Wavefront OBJ file.
//!
//! ## Frame loop
//! Every frame the whole pipeline runs from scratch:
//! - sample the curve up to the current animation time
//! - while paused, build the ribbon and extrude it into a solid
//! - if an export was requested, write the solid and clear the request
//! - draw the curve (and solid) in the viewport

use std::f64::consts::TAU;
use std::path::PathBuf;

use eframe::egui;

mod curve;
mod export;
mod geometry;
mod pipeline;
mod render;
mod settings;

use curve::{Axis, Preset};
use pipeline::{FrameOutput, FrameState, MAX_ANIMATION_TIME};
use render::{Camera, Viewport};
use settings::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting harmono-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_title("harmono-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "harmono-rs",
        options,
        Box::new(|cc| Ok(Box::new(HarmonographApp::new(cc)))),
    )
}

/// Main application state
pub struct HarmonographApp {
    state: FrameState,
    viewport: Viewport,
    show_settings: bool,

    /// Preset the parameters came from, `None` once edited by hand
    selected_preset: Option<Preset>,

    /// Target of the quick "Export" button
    export_path: PathBuf,
    status: String,
}

impl HarmonographApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let defaults = AppSettings::default();
        let mut app = Self {
            state: FrameState::new(defaults.params.clone(), defaults.pipeline.clone()),
            viewport: Viewport::new(),
            show_settings: true,
            selected_preset: Some(Preset::Classic),
            export_path: defaults.export_path.clone(),
            status: "Ready".to_string(),
        };

        AppSettings::load().apply(&mut app);
        app
    }

    /// Overwrite every curve parameter with a preset table
    fn apply_preset(&mut self, preset: Preset) {
        log::info!("Applying preset {}", preset.name());
        self.state.params = preset.parameters();
        self.selected_preset = Some(preset);
    }

    /// Ask for a destination, then arm an export for the next frame
    fn export_with_dialog(&mut self) {
        let file_name = self
            .export_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "harmonograph.obj".to_string());

        let mut dialog = rfd::FileDialog::new()
            .add_filter("Wavefront OBJ", &["obj"])
            .set_file_name(file_name);
        if let Some(dir) = self.export_path.parent().filter(|d| d.is_dir()) {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.save_file() {
            self.export_path = path.clone();
            self.state.request_export(path);
        }
    }

    fn report_export(&mut self, output: &FrameOutput) {
        match &output.export {
            Some(Ok(summary)) => {
                self.status = format!(
                    "Exported {} ({} v, {} vn, {} f)",
                    self.export_path.display(),
                    summary.vertices,
                    summary.normals,
                    summary.faces
                );
            }
            Some(Err(e)) => {
                self.status = format!("Export failed: {}", e);
            }
            None => {}
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("harmono-rs");
                ui.separator();

                let button_text = if self.state.is_animating {
                    "⏸ Pause"
                } else {
                    "▶ Animate"
                };
                if ui.button(button_text).clicked() {
                    self.state.is_animating = !self.state.is_animating;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.state.reset();
                }

                ui.separator();
                if ui.button("💾 Export").clicked() {
                    self.state.request_export(self.export_path.clone());
                }
                if ui.button("Export as…").clicked() {
                    self.export_with_dialog();
                }

                ui.separator();
                ui.toggle_value(&mut self.show_settings, "⚙ Settings");
                ui.separator();
                ui.label(&self.status);
            });
        });
    }

    fn settings_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("settings_panel")
            .min_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Preset");
                    ui.separator();

                    let selected_text = self.selected_preset.map_or("Custom", |p| p.name());
                    let mut chosen = None;
                    egui::ComboBox::from_label("Preset")
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for preset in Preset::all() {
                                if ui
                                    .selectable_label(self.selected_preset == Some(*preset), preset.name())
                                    .clicked()
                                {
                                    chosen = Some(*preset);
                                }
                            }
                        });
                    if let Some(preset) = chosen {
                        self.apply_preset(preset);
                    }

                    ui.separator();
                    self.curve_controls(ui);
                    ui.separator();
                    self.animation_controls(ui);
                    ui.separator();
                    self.surface_controls(ui);
                    ui.separator();
                    self.display_controls(ui);
                });
            });
    }

    fn curve_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Curve:");
        let mut edited = ui
            .add(egui::Slider::new(&mut self.state.params.amplitude, 0.05..=1.5).text("Amplitude"))
            .changed();

        for axis in Axis::all() {
            ui.collapsing(format!("{} axis", axis.name()), |ui| {
                for (i, osc) in self.state.params.axis_mut(*axis).iter_mut().enumerate() {
                    ui.label(format!("Oscillator {}", i + 1));
                    edited |= ui
                        .add(egui::Slider::new(&mut osc.frequency, 0.0..=10.0).text("Frequency"))
                        .changed();
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut osc.damping, 0.0..=0.1)
                                .text("Damping")
                                .logarithmic(true),
                        )
                        .changed();
                    edited |= ui
                        .add(egui::Slider::new(&mut osc.phase, 0.0..=TAU).text("Phase"))
                        .changed();
                }
            });
        }

        if edited {
            self.selected_preset = None;
        }
    }

    fn animation_controls(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Animation", |ui| {
            ui.add(
                egui::Slider::new(&mut self.state.config.animation_speed, 0.0..=5.0).text("Speed"),
            );

            let mut time = self.state.animation_time();
            if ui
                .add(egui::Slider::new(&mut time, 0.0..=MAX_ANIMATION_TIME).text("Time"))
                .changed()
            {
                self.state.set_animation_time(time);
            }
        });
    }

    fn surface_controls(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Surface", |ui| {
            ui.add(
                egui::Slider::new(&mut self.state.config.ribbon_offset, 0.005..=0.5)
                    .text("Ribbon width"),
            );
            ui.add(
                egui::Slider::new(&mut self.state.config.extrusion, 0.001..=0.2).text("Thickness"),
            );
            if self.state.is_animating {
                ui.small("Pause the animation to build the surface.");
            }
        });
    }

    fn display_controls(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Display", |ui| {
            let settings = &mut self.viewport.settings;
            ui.add(egui::Slider::new(&mut settings.line_width, 0.5..=5.0).text("Line width"));
            ui.checkbox(&mut settings.show_curve_with_surface, "Curve over surface");

            ui.horizontal(|ui| {
                ui.label("Curve");
                ui.color_edit_button_srgba(&mut settings.curve_color);
                ui.label("Mesh");
                ui.color_edit_button_srgba(&mut settings.mesh_color);
            });

            if ui.button("Reset view").clicked() {
                self.viewport.camera = Camera::default();
            }
        });
    }
}

impl eframe::App for HarmonographApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        let output = self.state.run_frame();
        self.report_export(&output);

        self.top_panel(ctx);
        if self.show_settings {
            self.settings_panel(ctx);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(format!("t = {:.2}", self.state.animation_time()));
                ui.separator();
                ui.small(format!("Points: {}", output.curve.len()));
                if let Some(solid) = &output.solid {
                    ui.separator();
                    ui.small(format!(
                        "Ribbon: {} vertices, {} triangles",
                        solid.ribbon_len(),
                        solid.triangle_count()
                    ));
                }
                if self.state.export_pending() {
                    ui.separator();
                    ui.small("Export queued");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let curve = output.curve_buffer();
            self.viewport.show(ui, &curve, output.solid.as_ref());
        });

        self.state.tick();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        AppSettings::from_app(self).save();
        log::info!("Settings saved");
    }
}
