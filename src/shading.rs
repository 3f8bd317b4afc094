//! Blinn-Phong local illumination.

use glam::Vec3A;

use crate::body::MAX_REFLECTIVITY;

/// Floor for the diffuse term, keeping unlit surfaces visible.
pub const AMBIENT: f32 = 0.1;

/// Lambertian diffuse factor with the ambient floor applied.
///
/// `light_dir` points from the surface toward the light.
pub fn diffuse_term(normal: Vec3A, light_dir: Vec3A) -> f32 {
    normal.dot(light_dir).max(AMBIENT)
}

/// Blinn-Phong specular highlight with a normalized energy factor.
///
/// `incoming` is the direction the viewing ray travels, so the half vector
/// is built from its negation. Higher reflectivity both sharpens the lobe
/// (as the exponent) and scales its intensity; zero reflectivity produces
/// no highlight at all.
pub fn specular_term(normal: Vec3A, incoming: Vec3A, light_dir: Vec3A, reflectivity: f32) -> f32 {
    let half = (light_dir - incoming).normalize_or_zero();
    let energy = (8.0 + reflectivity) / (8.0 * std::f32::consts::PI);
    energy * normal.dot(half).max(0.0).powf(reflectivity) * (reflectivity / MAX_REFLECTIVITY)
}

/// Full local shade of a surface point.
///
/// Combines the diffuse and specular terms and multiplies the result by the
/// shadow attenuation: color * diffuse + specular, all scaled by shadow.
pub fn local_shade(
    albedo: Vec3A,
    normal: Vec3A,
    point: Vec3A,
    incoming: Vec3A,
    reflectivity: f32,
    light_position: Vec3A,
    shadow: f32,
) -> Vec3A {
    let light_dir = (light_position - point).normalize_or_zero();
    let diffuse = diffuse_term(normal, light_dir);
    let specular = specular_term(normal, incoming, light_dir, reflectivity);
    (albedo * diffuse + Vec3A::splat(specular)) * shadow
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn diffuse_never_drops_below_the_ambient_floor() {
        assert_eq!(diffuse_term(Vec3A::Y, Vec3A::NEG_Y), AMBIENT);
        assert_eq!(diffuse_term(Vec3A::Y, Vec3A::X), AMBIENT);
        assert!((diffuse_term(Vec3A::Y, Vec3A::Y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_reflectivity_kills_the_highlight() {
        let specular = specular_term(Vec3A::Y, Vec3A::NEG_Y, Vec3A::Y, 0.0);
        assert_eq!(specular, 0.0);
    }

    #[test]
    fn aligned_half_vector_gives_the_peak_highlight() {
        // Light straight up, view straight down: the half vector equals the
        // normal, so the lobe is at its maximum.
        let specular = specular_term(Vec3A::Y, Vec3A::NEG_Y, Vec3A::Y, MAX_REFLECTIVITY);
        let expected = (8.0 + MAX_REFLECTIVITY) / (8.0 * PI);
        assert!((specular - expected).abs() < 1e-3);
    }

    #[test]
    fn highlights_vanish_past_the_horizon() {
        // Grazing light and view leave the half vector perpendicular to
        // the normal.
        let specular = specular_term(Vec3A::Y, Vec3A::NEG_X, Vec3A::X, 32.0);
        assert_eq!(specular, 0.0);
    }

    #[test]
    fn shadow_scales_the_whole_result() {
        let albedo = Vec3A::new(0.8, 0.4, 0.2);
        let lit = local_shade(albedo, Vec3A::Y, Vec3A::ZERO, Vec3A::NEG_Y, 0.0, Vec3A::Y, 1.0);
        let shaded = local_shade(albedo, Vec3A::Y, Vec3A::ZERO, Vec3A::NEG_Y, 0.0, Vec3A::Y, 0.5);
        assert!((shaded * 2.0 - lit).length() < 1e-6);
        assert!((lit - albedo).length() < 1e-6);
    }
}
