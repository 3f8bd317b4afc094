//! Random helpers for demo scene generation.
//!
//! Rendering itself is fully deterministic; randomness only decides where
//! the demo spheres land. The generator is an explicitly seeded ChaCha20,
//! so the same seed always rebuilds the same scene.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// ChaCha20 PRNG for a reproducible scene seed.
pub fn seeded(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(rng: &mut ChaCha20Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut ChaCha20Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Generate a random ground position inside a disk of the given radius,
/// using rejection sampling.
pub fn random_on_ground_disk(rng: &mut ChaCha20Rng, radius: f32) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -radius, radius),
            0.0,
            random_f32_range(rng, -radius, radius),
        );
        if p.length_squared() < radius * radius {
            return p;
        }
    }
}
