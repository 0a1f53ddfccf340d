//! Render module - UI components for visualization
//!
//! This module provides:
//! - An orbit camera with perspective projection
//! - The 3D viewport widget drawing the curve and the extruded solid

mod camera;
mod viewport;

pub use camera::Camera;
pub use viewport::Viewport;
