//! The per-pixel color kernel: closest hit, reflections and final packing.
//!
//! Everything in this module is a pure function of its arguments. The
//! dispatch strategies in [`crate::renderer`] call [`trace_pixel`] for every
//! pixel and rely on that purity for bit-identical outputs.

use glam::Vec3A;

use crate::camera::Camera;
use crate::intersect::{closest_hit, SurfaceHit};
use crate::ray::Ray;
use crate::scene::{Scene, LIGHT_INDEX, PLANE_INDEX};
use crate::settings::RayTracingSettings;
use crate::shading::{diffuse_term, local_shade, specular_term};
use crate::shadow::shadow_attenuation;

/// Mirror `direction` about the surface normal.
pub fn reflect(direction: Vec3A, normal: Vec3A) -> Vec3A {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Fully traced pixel packed as 0xAARRGGBB.
pub fn trace_pixel(
    scene: &Scene,
    camera: &Camera,
    settings: &RayTracingSettings,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> u32 {
    pack_color(pixel_color(scene, camera, settings, x, y, width, height))
}

/// Color of one pixel in linear [0,1] RGB, before packing.
///
/// A miss shows the skybox, the light body shows its raw color, everything
/// else goes through shading and reflections.
pub fn pixel_color(
    scene: &Scene,
    camera: &Camera,
    settings: &RayTracingSettings,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Vec3A {
    let ray = camera.primary_ray(x, y, width, height);
    match closest_hit(scene.bodies(), &ray) {
        None => scene.skybox().sample(ray.direction),
        Some(hit) if hit.index == LIGHT_INDEX => {
            let (_, _, color) = scene.light();
            color
        }
        Some(hit) => shade_surface(scene, settings, &hit, ray.direction),
    }
}

/// Shade a primary hit: blend in the reflection color, then apply the local
/// Blinn-Phong shading and the soft shadow on top.
fn shade_surface(
    scene: &Scene,
    settings: &RayTracingSettings,
    hit: &SurfaceHit,
    incoming: Vec3A,
) -> Vec3A {
    let body = &scene.bodies()[hit.index];
    let base = body.surface_color(hit.point);
    let fraction = body.reflectivity_fraction();

    let blended = if settings.reflection_bounces > 0 && fraction > 0.0 {
        let bounced = accumulate_reflections(scene, settings, hit, incoming);
        base.lerp(bounced, fraction)
    } else {
        base
    };

    let (light_position, _, _) = scene.light();
    let shadow = shadow_attenuation(scene, hit.point, settings.shadow_samples);
    local_shade(
        blended,
        body.normal_at(hit.point),
        hit.point,
        incoming,
        body.reflectivity(),
        light_position,
        shadow,
    )
}

/// Accumulated color gathered by bouncing a mirror ray off `first`.
///
/// Iterative rather than recursive: a running weight starts at 1 and decays
/// by the hit surface's reflectivity fraction and shading factor on every
/// bounce, so the loop terminates at the bounce limit or as soon as the
/// weight reaches zero. Escaped rays terminate on the skybox, rays that
/// reach the light terminate on its raw color.
fn accumulate_reflections(
    scene: &Scene,
    settings: &RayTracingSettings,
    first: &SurfaceHit,
    incoming: Vec3A,
) -> Vec3A {
    let mut color = Vec3A::ZERO;
    let mut weight = 1.0_f32;
    let mut index = first.index;
    let mut point = first.point;
    let mut direction = incoming;

    for bounce in 0..settings.reflection_bounces {
        let normal = scene.bodies()[index].normal_at(point);
        let mirrored = reflect(direction, normal);
        let ray = Ray::leaving(point, mirrored);

        match closest_hit(scene.bodies(), &ray) {
            None => {
                color += scene.skybox().sample(mirrored) * weight;
                break;
            }
            Some(next) if next.index == LIGHT_INDEX => {
                let (_, _, light_color) = scene.light();
                color += light_color * weight;
                break;
            }
            Some(next) => {
                let (shaded, factor) = bounce_shade(scene, settings, &next, mirrored);
                let fraction = scene.bodies()[next.index].reflectivity_fraction();
                // The last bounce cannot recurse further, so it contributes
                // its full weight instead of the non-reflected remainder.
                let last = bounce + 1 == settings.reflection_bounces;
                let contribution = if last { weight } else { weight * (1.0 - fraction) };
                color += shaded * contribution;
                weight *= fraction * factor;
                if weight <= 0.0 {
                    break;
                }
                index = next.index;
                point = next.point;
                direction = mirrored;
            }
        }
    }

    color
}

/// Shade a surface seen through a reflection.
///
/// Returns the shaded color and the scalar brightness factor the bounce
/// chain compounds by. The checkerboard plane is treated as fully lit
/// inside reflections and skips shading entirely.
fn bounce_shade(
    scene: &Scene,
    settings: &RayTracingSettings,
    hit: &SurfaceHit,
    incoming: Vec3A,
) -> (Vec3A, f32) {
    let body = &scene.bodies()[hit.index];
    if hit.index == PLANE_INDEX {
        return (body.surface_color(hit.point), 1.0);
    }

    let (light_position, _, _) = scene.light();
    let normal = body.normal_at(hit.point);
    let light_dir = (light_position - hit.point).normalize_or_zero();
    let diffuse = diffuse_term(normal, light_dir);
    let specular = specular_term(normal, incoming, light_dir, body.reflectivity());
    let shadow = shadow_attenuation(scene, hit.point, settings.shadow_samples);
    let color = (body.surface_color(hit.point) * diffuse + Vec3A::splat(specular)) * shadow;
    (color, diffuse * shadow)
}

/// Pack a linear [0,1] color into 0xAARRGGBB with full alpha.
///
/// Channels are clamped, scaled to [0,255] and truncated.
pub fn pack_color(color: Vec3A) -> u32 {
    let scaled = color.clamp(Vec3A::ZERO, Vec3A::ONE) * 255.0;
    0xFF00_0000 | ((scaled.x as u32) << 16) | ((scaled.y as u32) << 8) | scaled.z as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::skybox::Skybox;

    fn simple_scene(sphere_reflectivity: f32, skybox: Skybox) -> Scene {
        Scene::new(
            vec![
                Body::Light {
                    position: Vec3A::new(1.0, 3.0, -1.5),
                    radius: 0.4,
                    color: Vec3A::ONE,
                },
                Body::Plane { height: 0.0, reflectivity: 0.0 },
                Body::Sphere {
                    position: Vec3A::new(0.0, 1.0, 0.0),
                    radius: 1.0,
                    color: Vec3A::new(0.8, 0.2, 0.2),
                    reflectivity: sphere_reflectivity,
                },
            ],
            skybox,
        )
        .unwrap()
    }

    #[test]
    fn packing_clamps_and_sets_full_alpha() {
        assert_eq!(pack_color(Vec3A::ZERO), 0xFF00_0000);
        assert_eq!(pack_color(Vec3A::ONE), 0xFFFF_FFFF);
        assert_eq!(pack_color(Vec3A::new(1.0, 0.0, 0.0)), 0xFFFF_0000);
        assert_eq!(pack_color(Vec3A::new(2.0, -1.0, 0.5)), 0xFFFF_007F);
    }

    #[test]
    fn reflect_mirrors_about_the_normal() {
        let incoming = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let mirrored = reflect(incoming, Vec3A::Y);
        assert!((mirrored - Vec3A::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        // Reflecting twice restores the direction.
        assert!((reflect(mirrored, Vec3A::Y) - incoming).length() < 1e-6);
    }

    #[test]
    fn misses_show_the_skybox_unshaded() {
        let background = Vec3A::new(0.1, 0.4, 0.7);
        let scene = simple_scene(0.0, Skybox::solid(background));
        let camera = Camera::default();
        let settings = RayTracingSettings { shadow_samples: 1, reflection_bounces: 1 };
        // Top corner pixels look upward past every body.
        let color = pixel_color(&scene, &camera, &settings, 0, 0, 64, 64);
        assert_eq!(color, background);
    }

    #[test]
    fn the_light_body_renders_its_raw_color() {
        let light_color = Vec3A::new(1.0, 0.9, 0.8);
        let scene = Scene::new(
            vec![
                Body::Light {
                    position: Vec3A::new(0.0, 3.0, 0.0),
                    radius: 0.5,
                    color: light_color,
                },
                Body::Plane { height: 0.0, reflectivity: 0.0 },
            ],
            Skybox::solid(Vec3A::ZERO),
        )
        .unwrap();
        let camera = Camera::new(Vec3A::new(0.0, 3.0, -4.0), 0.0, 0.0, 60.0);
        let settings = RayTracingSettings::default();
        // The center pixel looks straight at the light sphere.
        let color = pixel_color(&scene, &camera, &settings, 32, 32, 64, 64);
        assert_eq!(color, light_color);
    }

    #[test]
    fn zero_reflectivity_matches_the_plain_local_shade() {
        let scene = simple_scene(0.0, Skybox::solid(Vec3A::ONE));
        let camera = Camera::default();
        let with_bounces = RayTracingSettings { shadow_samples: 1, reflection_bounces: 3 };
        let without = RayTracingSettings { shadow_samples: 1, reflection_bounces: 0 };
        // Pixel (32, 18) hits the sphere front face.
        let a = pixel_color(&scene, &camera, &with_bounces, 32, 18, 64, 64);
        let b = pixel_color(&scene, &camera, &without, 32, 18, 64, 64);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_bounces_ignore_the_environment_entirely() {
        let red = simple_scene(64.0, Skybox::solid(Vec3A::new(1.0, 0.0, 0.0)));
        let green = simple_scene(64.0, Skybox::solid(Vec3A::new(0.0, 1.0, 0.0)));
        let camera = Camera::default();
        let flat = RayTracingSettings { shadow_samples: 1, reflection_bounces: 0 };
        let a = pixel_color(&red, &camera, &flat, 32, 18, 64, 64);
        let b = pixel_color(&green, &camera, &flat, 32, 18, 64, 64);
        assert_eq!(a, b);

        // With a bounce allowed, the mirror ray off the sphere's upper face
        // escapes to the skybox and the colors split.
        let bounced = RayTracingSettings { shadow_samples: 1, reflection_bounces: 1 };
        let c = pixel_color(&red, &camera, &bounced, 32, 10, 64, 64);
        let d = pixel_color(&green, &camera, &bounced, 32, 10, 64, 64);
        assert_ne!(c, d);
    }
}
