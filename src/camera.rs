//! Camera producing per-pixel view rays.

use glam::{Mat3A, Vec3A};

use crate::ray::Ray;

/// Pinhole camera described by position, yaw/pitch and field of view.
///
/// Angles are in degrees. A render pass only reads the camera; input
/// handling mutates the fields between frames.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3A,
    /// Rotation around the world Y axis, in degrees.
    pub yaw: f32,
    /// Rotation around the camera-local X axis, in degrees. Positive looks
    /// down.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Camera {
    /// Camera at `position` with the given yaw, pitch and field of view.
    pub fn new(position: Vec3A, yaw: f32, pitch: f32, fov: f32) -> Self {
        Self { position, yaw, pitch, fov }
    }

    /// Primary ray through pixel (x, y) of a width x height viewport.
    ///
    /// Screen coordinates are aspect-corrected so the shorter viewport
    /// dimension spans [-1, 1] and the longer one scales proportionally,
    /// keeping pixels square. Pitch is applied before yaw.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let w = width as f32;
        let h = height as f32;
        let (nx, ny) = if width > height {
            (
                ((x as f32 - w / 2.0 + h / 2.0) / h) * 2.0 - 1.0,
                -((y as f32 / h) * 2.0 - 1.0),
            )
        } else {
            (
                (x as f32 / w) * 2.0 - 1.0,
                -(((y as f32 - h / 2.0 + w / 2.0) / w) * 2.0 - 1.0),
            )
        };

        // The eye sits 1/tan(fov/2) behind a unit screen plane.
        let focal = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let rotation = Mat3A::from_rotation_y(self.yaw.to_radians())
            * Mat3A::from_rotation_x(self.pitch.to_radians());
        let direction = rotation * Vec3A::new(nx, ny, focal).normalize();

        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    /// Camera at (0, 0, -4) looking straight down +Z with a 60 degree fov.
    fn default() -> Self {
        Self::new(Vec3A::new(0.0, 0.0, -4.0), 0.0, 0.0, 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3A, b: Vec3A) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn center_pixel_looks_straight_ahead() {
        let camera = Camera::new(Vec3A::new(0.0, 0.0, -4.0), 0.0, 0.0, 90.0);
        let ray = camera.primary_ray(32, 32, 64, 64);
        assert_eq!(ray.origin, camera.position);
        assert_close(ray.direction, Vec3A::Z);
    }

    #[test]
    fn yaw_rotates_the_view_around_y() {
        let camera = Camera::new(Vec3A::ZERO, 90.0, 0.0, 90.0);
        let ray = camera.primary_ray(32, 32, 64, 64);
        assert_close(ray.direction, Vec3A::X);
    }

    #[test]
    fn negative_pitch_looks_up() {
        let camera = Camera::new(Vec3A::ZERO, 0.0, -90.0, 90.0);
        let ray = camera.primary_ray(32, 32, 64, 64);
        assert_close(ray.direction, Vec3A::Y);
    }

    #[test]
    fn wide_viewport_extends_the_horizontal_range() {
        // With a 90 degree fov the focal length is 1, so the unrotated
        // direction is proportional to (nx, ny, 1).
        let camera = Camera::new(Vec3A::ZERO, 0.0, 0.0, 90.0);
        let ray = camera.primary_ray(0, 0, 128, 64);
        assert_close(ray.direction, Vec3A::new(-2.0, 1.0, 1.0).normalize());
        let ray = camera.primary_ray(127, 63, 128, 64);
        let expected = Vec3A::new(
            ((127.0 - 64.0 + 32.0) / 64.0) * 2.0 - 1.0,
            -((63.0 / 64.0) * 2.0 - 1.0),
            1.0,
        );
        assert_close(ray.direction, expected.normalize());
    }

    #[test]
    fn directions_are_unit_length() {
        let camera = Camera::default();
        for &(x, y) in &[(0, 0), (17, 3), (63, 63)] {
            let ray = camera.primary_ray(x, y, 64, 48);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}
