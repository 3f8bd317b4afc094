//! # Output Module
//!
//! Exports rendered frames to disk. The renderer produces packed
//! 0xAARRGGBB buffers; this module unpacks them into 8-bit RGBA images and
//! writes PNG files.
//!
//! Colors are stored already clamped to [0,1] by the packing step, so the
//! export is a straight byte shuffle with no tone mapping.

use image::{Rgba, RgbaImage};
use log::{info, warn};

/// Save a packed 0xAARRGGBB pixel buffer as a PNG file.
///
/// The buffer is expected in row-major order with exactly width * height
/// entries. I/O problems are logged as warnings rather than panicking, so
/// an interactive session survives a failed save.
///
/// # Arguments
///
/// * `pixels` - packed frame buffer as produced by the renderer
/// * `width` - image width in pixels
/// * `height` - image height in pixels
/// * `output_path` - file path for the output PNG
pub fn save_png(pixels: &[u32], width: u32, height: u32, output_path: &str) {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        warn!(
            "Not saving {}: buffer holds {} pixels but {}x{} needs {}",
            output_path,
            pixels.len(),
            width,
            height,
            expected
        );
        return;
    }

    let image: RgbaImage = RgbaImage::from_fn(width, height, |x, y| {
        let packed = pixels[y as usize * width as usize + x as usize];
        Rgba([
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
            (packed >> 24) as u8,
        ])
    });

    match image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}
