//! Spherical environment texture.
//!
//! The skybox supplies the background for primary rays that miss every body
//! and the terminal color for reflection rays that escape the scene.

use std::error::Error;
use std::path::Path;

use glam::Vec3A;
use log::info;

/// Immutable spherical environment map.
///
/// Stores a row-major RGB field with channel values in [0,1]. Directions are
/// mapped to texels with an equirectangular (spherical UV) projection, so a
/// single flat image wraps the whole sphere.
#[derive(Debug, Clone)]
pub struct Skybox {
    width: usize,
    height: usize,
    texels: Vec<Vec3A>,
}

impl Skybox {
    /// Create a skybox from a row-major color field.
    ///
    /// Fails when a dimension is zero or the field length does not match.
    pub fn new(width: usize, height: usize, texels: Vec<Vec3A>) -> Result<Self, Box<dyn Error>> {
        if width == 0 || height == 0 {
            return Err(format!("skybox dimensions must be non-zero, got {width}x{height}").into());
        }
        if texels.len() != width * height {
            return Err(format!(
                "skybox field holds {} texels but {width}x{height} needs {}",
                texels.len(),
                width * height
            )
            .into());
        }
        Ok(Self { width, height, texels })
    }

    /// Load a skybox from an equirectangular image file.
    ///
    /// Any format the `image` crate decodes works; channels are converted
    /// to f32 in [0,1].
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let decoded = image::open(path)?.to_rgb32f();
        let (width, height) = decoded.dimensions();
        let texels = decoded
            .pixels()
            .map(|pixel| Vec3A::new(pixel[0], pixel[1], pixel[2]))
            .collect();
        let skybox = Self::new(width as usize, height as usize, texels)?;
        info!("Loaded skybox {} ({}x{})", path.display(), width, height);
        Ok(skybox)
    }

    /// Bake a vertical gradient sky, blue at the zenith fading to white at
    /// the nadir. Default environment when no skybox image is supplied.
    pub fn gradient(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let zenith = Vec3A::new(0.5, 0.7, 1.0);
        let nadir = Vec3A::ONE;
        let mut texels = Vec::with_capacity(width * height);
        for row in 0..height {
            let t = if height > 1 {
                row as f32 / (height - 1) as f32
            } else {
                0.0
            };
            let color = zenith.lerp(nadir, t);
            texels.extend(std::iter::repeat(color).take(width));
        }
        Self { width, height, texels }
    }

    /// Single-texel skybox of one uniform color.
    pub fn solid(color: Vec3A) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Texture width in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Texture height in texels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color of the environment in a given direction.
    ///
    /// u wraps around the Y axis from the azimuth, v runs from the zenith
    /// (v = 0, straight up) to the nadir (v = 1, straight down).
    pub fn sample(&self, direction: Vec3A) -> Vec3A {
        use std::f32::consts::PI;
        let d = direction.normalize_or_zero();
        let u = 0.5 + d.z.atan2(d.x) / (2.0 * PI);
        // |y| can creep past 1 by rounding and asin would return NaN.
        let v = 0.5 - d.y.clamp(-1.0, 1.0).asin() / PI;
        let x = (u * (self.width - 1) as f32) as usize;
        let y = (v * (self.height - 1) as f32) as usize;
        self.texels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn new_rejects_mismatched_field() {
        assert!(Skybox::new(2, 2, vec![Vec3A::ZERO; 3]).is_err());
        assert!(Skybox::new(0, 2, Vec::new()).is_err());
        assert!(Skybox::new(2, 2, vec![Vec3A::ZERO; 4]).is_ok());
    }

    #[test]
    fn solid_returns_its_color_for_any_direction() {
        let color = Vec3A::new(0.3, 0.6, 0.9);
        let skybox = Skybox::solid(color);
        assert_eq!(skybox.sample(Vec3A::Y), color);
        assert_eq!(skybox.sample(Vec3A::new(-0.3, 0.1, 0.7).normalize()), color);
    }

    #[test]
    fn sampling_wraps_around_the_azimuth() {
        // A full turn around Y must land on the same texel.
        let texels = (0..32).map(|i| Vec3A::splat(i as f32 / 32.0)).collect();
        let skybox = Skybox::new(8, 4, texels).unwrap();
        let once = skybox.sample(Vec3A::X);
        let again = skybox.sample(Vec3A::new(TAU.cos(), 0.0, TAU.sin()));
        assert_eq!(once, again);
    }

    #[test]
    fn gradient_is_blue_up_and_white_down() {
        let skybox = Skybox::gradient(8, 8);
        assert_eq!(skybox.sample(Vec3A::Y), Vec3A::new(0.5, 0.7, 1.0));
        assert_eq!(skybox.sample(Vec3A::NEG_Y), Vec3A::ONE);
    }
}
