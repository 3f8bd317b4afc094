//! Soft shadow estimation against the scene light.

use glam::Vec3A;

use crate::intersect::closest_hit;
use crate::ray::Ray;
use crate::scene::{Scene, PLANE_INDEX};

/// Softens the shadow term: a fully blocked point keeps
/// 1 - 1/(1 + SHADOW_STRENGTH) of its light instead of going black.
const SHADOW_STRENGTH: f32 = 0.25;

/// Soft shadow attenuation factor in [0,1] for a surface point.
///
/// Samples a disk of the light's radius with a golden-angle spiral, a
/// deterministic low-discrepancy pattern, so identical inputs always yield
/// identical shadows. Each sample casts a feeler ray from `point` toward
/// the sample position; only spheres occlude, the light and the plane never
/// count as blockers.
pub fn shadow_attenuation(scene: &Scene, point: Vec3A, samples: u32) -> f32 {
    if samples == 0 {
        return 1.0;
    }
    let (light_position, light_radius, _) = scene.light();
    let to_point = point - light_position;
    if to_point.length_squared() <= f32::EPSILON {
        return 1.0;
    }
    let axis = to_point.normalize();
    let (u, v) = disk_basis(axis);

    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let mut blocked = 0u32;
    for i in 0..samples {
        let angle = i as f32 * golden_angle;
        let spread = (i as f32 / samples as f32).sqrt() * 2.0 * light_radius;
        let target =
            light_position + u * (spread * angle.cos()) + v * (spread * angle.sin());
        let feeler = Ray::leaving(point, (target - point).normalize_or_zero());
        if let Some(hit) = closest_hit(scene.bodies(), &feeler) {
            if hit.index > PLANE_INDEX {
                blocked += 1;
            }
        }
    }

    if blocked == 0 {
        1.0
    } else {
        (1.0 - blocked as f32 / (samples as f32 * (1.0 + SHADOW_STRENGTH))).max(0.0)
    }
}

/// Orthonormal basis (u, v) spanning the disk perpendicular to `axis`.
fn disk_basis(axis: Vec3A) -> (Vec3A, Vec3A) {
    let helper = if axis.y.abs() < 0.99 { Vec3A::Y } else { Vec3A::X };
    let u = axis.cross(helper).normalize();
    let v = axis.cross(u);
    (u, v)
}
