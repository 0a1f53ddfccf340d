//! Orbit camera for the 3D viewport
//!
//! Right-handed coordinates: X right, Y up, Z towards the viewer. The
//! default camera sits at `(0, 0, 5)` looking at the origin with a 45° FOV.

use std::f32::consts::PI;

use nalgebra::{Matrix4, Point3, Vector3};

/// Camera for 3D viewing
#[derive(Clone, Debug)]
pub struct Camera {
    /// Camera position
    pub position: Point3<f32>,
    /// Point the camera is looking at
    pub target: Point3<f32>,
    /// Up vector
    pub up: Vector3<f32>,
    /// Field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: PI / 4.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// A point after projection: normalized device X/Y in `[-1, 1]` plus depth
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction (larger = farther)
    pub depth: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, self.fov, self.near, self.far)
    }

    /// Unit vector from the target towards the camera
    pub fn eye_direction(&self) -> Vector3<f32> {
        (self.position - self.target)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::z)
    }

    /// Project a world point; `None` if it is behind the near plane
    pub fn project(&self, view_proj: &Matrix4<f32>, view: &Matrix4<f32>, p: &Point3<f32>) -> Option<Projected> {
        let eye = view.transform_point(p);
        // Looking down -Z in view space
        let depth = -eye.z;
        if depth < self.near {
            return None;
        }
        let ndc = view_proj.transform_point(p);
        Some(Projected {
            x: ndc.x,
            y: ndc.y,
            depth,
        })
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let distance = offset.magnitude();
        if distance <= f32::EPSILON {
            return;
        }

        // Convert to spherical coordinates
        let current_yaw = offset.z.atan2(offset.x);
        let current_pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();

        let new_yaw = current_yaw + yaw;
        let new_pitch = (current_pitch + pitch).clamp(-PI / 2.0 + 0.1, PI / 2.0 - 0.1);

        let cos_pitch = new_pitch.cos();
        self.position = self.target
            + Vector3::new(
                distance * cos_pitch * new_yaw.cos(),
                distance * new_pitch.sin(),
                distance * cos_pitch * new_yaw.sin(),
            );
    }

    /// Zoom the camera (move closer/farther from target)
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let new_distance = (offset.magnitude() * factor).clamp(0.5, self.far * 0.5);
        self.position = self.target + self.eye_direction() * new_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_default() {
        let cam = Camera::default();
        assert_eq!(cam.position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.target, Point3::origin());
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut cam = Camera::default();
        cam.orbit(0.7, 0.3);
        assert_relative_eq!((cam.position - cam.target).norm(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_limits() {
        let mut cam = Camera::default();
        cam.zoom(0.0);
        assert_relative_eq!((cam.position - cam.target).norm(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_project_origin_is_centered() {
        let cam = Camera::default();
        let view = cam.view_matrix();
        let vp = cam.projection_matrix(1.0) * view;
        let p = cam.project(&vp, &view, &Point3::origin()).unwrap();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.depth, 5.0, epsilon = 1e-5);

        // Behind the camera
        assert!(cam.project(&vp, &view, &Point3::new(0.0, 0.0, 10.0)).is_none());
    }
}
