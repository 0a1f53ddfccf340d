use std::path::PathBuf;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::curve::{CurveParameters, Preset};
use crate::pipeline::PipelineConfig;
use crate::HarmonographApp;

/// Returns the path to the settings file: `~/.config/harmono-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("harmono-rs");
    path.push("settings.json");
    path
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Curve
    pub params: CurveParameters,
    pub selected_preset: Option<Preset>,

    // Geometry + animation
    pub pipeline: PipelineConfig,

    // Display
    pub show_settings: bool,
    pub line_width: f32,
    pub show_curve_with_surface: bool,

    // Color (stored as u8 triples since Color32 isn't serde-friendly)
    pub curve_color: [u8; 3],
    pub mesh_color: [u8; 3],

    // Export
    pub export_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            params: CurveParameters::default(),
            selected_preset: Some(Preset::Classic),

            pipeline: PipelineConfig::default(),

            show_settings: true,
            line_width: 1.5,
            show_curve_with_surface: false,

            curve_color: [255, 255, 255],
            mesh_color: [90, 160, 255],

            export_path: PathBuf::from("harmonograph.obj"),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                log::warn!("Failed to parse settings ({}), using defaults", e);
                Self::default()
            }),
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn from_json(contents: &str) -> serde_json::Result<Self> {
        let settings = serde_json::from_str(contents)?;
        log::info!("Loaded settings from {}", settings_path().display());
        Ok(settings)
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Extract current settings from the running application.
    pub fn from_app(app: &HarmonographApp) -> Self {
        let display = &app.viewport.settings;
        Self {
            params: app.state.params.clone(),
            selected_preset: app.selected_preset,

            pipeline: app.state.config.clone(),

            show_settings: app.show_settings,
            line_width: display.line_width,
            show_curve_with_surface: display.show_curve_with_surface,

            curve_color: [display.curve_color.r(), display.curve_color.g(), display.curve_color.b()],
            mesh_color: [display.mesh_color.r(), display.mesh_color.g(), display.mesh_color.b()],

            export_path: app.export_path.clone(),
        }
    }

    /// Apply loaded settings to the running application.
    pub fn apply(&self, app: &mut HarmonographApp) {
        app.state.params = self.params.clone();
        app.selected_preset = self.selected_preset;

        app.state.config = self.pipeline.clone();

        app.show_settings = self.show_settings;

        let display = &mut app.viewport.settings;
        display.line_width = self.line_width;
        display.show_curve_with_surface = self.show_curve_with_surface;

        let [r, g, b] = self.curve_color;
        display.curve_color = egui::Color32::from_rgb(r, g, b);
        let [r, g, b] = self.mesh_color;
        display.mesh_color = egui::Color32::from_rgb(r, g, b);

        app.export_path = self.export_path.clone();
    }
}
