//! Scene bodies: the light, the ground plane and the spheres.
//!
//! A single tagged enum covers every renderable entity, so intersection,
//! normal and color lookups dispatch on the variant inside shared functions
//! and a scene stays one dense, index-aligned array.

use glam::Vec3A;

/// Reflectivity value that maps to a fully mirrored surface.
///
/// Body reflectivities live on a 0-128 scale; dividing by this constant
/// yields the [0,1] blend fraction used when mixing in reflections.
pub const MAX_REFLECTIVITY: f32 = 128.0;

/// Sentinel reported as the size of the infinite ground plane.
pub const INFINITE_EXTENT: f32 = -1.0;

const CHECKER_BRIGHT: Vec3A = Vec3A::new(0.9, 0.9, 0.9);
const CHECKER_DARK: Vec3A = Vec3A::new(0.2, 0.2, 0.2);

/// A renderable scene entity.
///
/// The variants carry their own payloads instead of sharing a base struct;
/// everything downstream matches on the tag.
#[derive(Debug, Clone, Copy)]
pub enum Body {
    /// Spherical light source. Drawn unshaded and never reflective.
    Light {
        /// Center of the light sphere.
        position: Vec3A,
        /// Radius of the light sphere; also the extent of the soft-shadow disk.
        radius: f32,
        /// Emitted color, each channel in [0,1].
        color: Vec3A,
    },
    /// Infinite horizontal ground plane with a procedural checkerboard.
    Plane {
        /// World-space Y coordinate of the plane.
        height: f32,
        /// Reflectivity on the 0-128 scale.
        reflectivity: f32,
    },
    /// Solid colored sphere.
    Sphere {
        /// Center of the sphere.
        position: Vec3A,
        /// Radius of the sphere, strictly positive.
        radius: f32,
        /// Surface color, each channel in [0,1].
        color: Vec3A,
        /// Reflectivity on the 0-128 scale.
        reflectivity: f32,
    },
}

impl Body {
    /// Position of the body. For the plane only the Y component carries
    /// meaning; X and Z are reported as zero.
    pub fn position(&self) -> Vec3A {
        match *self {
            Body::Light { position, .. } | Body::Sphere { position, .. } => position,
            Body::Plane { height, .. } => Vec3A::new(0.0, height, 0.0),
        }
    }

    /// Size of the body: the radius for the light and the spheres,
    /// [`INFINITE_EXTENT`] for the plane.
    pub fn size(&self) -> f32 {
        match *self {
            Body::Light { radius, .. } | Body::Sphere { radius, .. } => radius,
            Body::Plane { .. } => INFINITE_EXTENT,
        }
    }

    /// Reflectivity on the 0-128 scale. The light is never reflective.
    pub fn reflectivity(&self) -> f32 {
        match *self {
            Body::Light { .. } => 0.0,
            Body::Plane { reflectivity, .. } | Body::Sphere { reflectivity, .. } => reflectivity,
        }
    }

    /// Reflectivity as a [0,1] blend fraction.
    pub fn reflectivity_fraction(&self) -> f32 {
        (self.reflectivity() / MAX_REFLECTIVITY).clamp(0.0, 1.0)
    }

    /// Outward surface normal at a point on the body.
    pub fn normal_at(&self, point: Vec3A) -> Vec3A {
        match *self {
            Body::Plane { .. } => Vec3A::Y,
            Body::Light { position, .. } | Body::Sphere { position, .. } => {
                (point - position).normalize()
            }
        }
    }

    /// Base surface color at a point, before any illumination.
    ///
    /// The plane computes its checkerboard procedurally from the hit
    /// position; the light and the spheres return their stored color.
    pub fn surface_color(&self, point: Vec3A) -> Vec3A {
        match *self {
            Body::Light { color, .. } | Body::Sphere { color, .. } => color,
            Body::Plane { .. } => {
                // rem_euclid keeps the parity stable across negative coordinates.
                let parity = (point.x.floor() + point.z.floor()).rem_euclid(2.0);
                if parity < 1.0 {
                    CHECKER_BRIGHT
                } else {
                    CHECKER_DARK
                }
            }
        }
    }
}
