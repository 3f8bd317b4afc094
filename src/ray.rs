//! Ray representation for 3D ray tracing.
//!
//! A ray is r(t) = origin + t * direction. Directions are kept unit length
//! throughout the crate, so the intersection parameter t doubles as the
//! distance from the ray origin.

use glam::Vec3A;

/// Offset applied when spawning secondary rays from a surface point.
///
/// Shadow feelers and reflection rays start this far along their own
/// direction so they cannot immediately re-hit the surface they left.
pub const SURFACE_OFFSET: f32 = 1e-3;

/// Ray in 3D space defined by origin and unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,
    /// Unit direction vector of the ray.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Create a secondary ray leaving a surface point.
    ///
    /// The origin is nudged along `direction` by [`SURFACE_OFFSET`].
    pub fn leaving(point: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin: point + direction * SURFACE_OFFSET,
            direction,
        }
    }

    /// Compute the point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_the_direction() {
        let ray = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::Z);
        assert_eq!(ray.at(0.0), Vec3A::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(2.5), Vec3A::new(1.0, 2.0, 5.5));
    }

    #[test]
    fn leaving_offsets_the_origin() {
        let ray = Ray::leaving(Vec3A::ZERO, Vec3A::Y);
        assert!((ray.origin.y - SURFACE_OFFSET).abs() < 1e-9);
        assert_eq!(ray.direction, Vec3A::Y);
    }
}
