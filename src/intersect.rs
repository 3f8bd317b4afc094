//! Ray/body intersection and closest-hit resolution.

use glam::Vec3A;

use crate::body::Body;
use crate::ray::Ray;

/// A resolved ray/scene intersection.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Index of the hit body in the scene's body array.
    pub index: usize,
    /// World-space hit point.
    pub point: Vec3A,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Distance along `ray` to the nearest valid intersection with `body`.
///
/// Returns `None` when the body is missed or lies behind the origin. A ray
/// parallel to the plane produces a non-finite t and is rejected here
/// instead of leaking NaN or infinity downstream.
pub fn intersect(body: &Body, ray: &Ray) -> Option<f32> {
    match *body {
        Body::Plane { height, .. } => intersect_plane(height, ray),
        Body::Light { position, radius, .. } | Body::Sphere { position, radius, .. } => {
            intersect_sphere(position, radius, ray)
        }
    }
}

fn intersect_plane(height: f32, ray: &Ray) -> Option<f32> {
    let t = -(ray.origin.y - height) / ray.direction.y;
    (t.is_finite() && t > 0.0).then_some(t)
}

fn intersect_sphere(center: Vec3A, radius: f32, ray: &Ray) -> Option<f32> {
    // Project the center onto the ray to find the closest approach.
    let t = (center - ray.origin).dot(ray.direction);
    let spread = (center - ray.at(t)).length();
    if spread >= radius {
        return None;
    }
    let entry = t - (radius * radius - spread * spread).sqrt();
    (entry > 0.0).then_some(entry)
}

/// Nearest intersection of `ray` with any body, scanning in index order.
///
/// Ties keep the earlier body. The same scan serves primary, reflection
/// and shadow-feeler rays.
pub fn closest_hit(bodies: &[Body], ray: &Ray) -> Option<SurfaceHit> {
    let mut nearest: Option<(usize, f32)> = None;
    for (index, body) in bodies.iter().enumerate() {
        if let Some(distance) = intersect(body, ray) {
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((index, distance)),
            }
        }
    }
    nearest.map(|(index, distance)| SurfaceHit {
        index,
        point: ray.at(distance),
        distance,
    })
}
