//! Frame rendering: serial and tiled-parallel dispatch of the pixel kernel.

use std::error::Error;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::scene::Scene;
use crate::settings::{RayTracingSettings, RenderStrategy};
use crate::tracer::trace_pixel;

/// Everything a render pass reads, borrowed from the frame orchestrator.
///
/// Bundling the references keeps the kernel a pure function of its inputs:
/// no globals, and nothing mutated while a dispatch is in flight.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Bodies and skybox.
    pub scene: &'a Scene,
    /// View position and orientation.
    pub camera: &'a Camera,
    /// Quality knobs.
    pub settings: &'a RayTracingSettings,
}

impl<'a> FrameContext<'a> {
    /// Borrow a scene, camera and settings for one or more render passes.
    pub fn new(scene: &'a Scene, camera: &'a Camera, settings: &'a RayTracingSettings) -> Self {
        Self { scene, camera, settings }
    }
}

/// Render a frame into a freshly allocated packed 0xAARRGGBB buffer.
pub fn render(ctx: &FrameContext, width: u32, height: u32, strategy: RenderStrategy) -> Vec<u32> {
    let mut pixels = vec![0u32; width as usize * height as usize];
    dispatch(ctx, width, height, strategy, &mut pixels);
    pixels
}

/// Render a frame into a caller-owned buffer of exactly width * height
/// packed pixels.
pub fn render_into(
    ctx: &FrameContext,
    width: u32,
    height: u32,
    strategy: RenderStrategy,
    pixels: &mut [u32],
) -> Result<(), Box<dyn Error>> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(format!(
            "pixel buffer holds {} entries but a {}x{} frame needs {}",
            pixels.len(),
            width,
            height,
            expected
        )
        .into());
    }
    dispatch(ctx, width, height, strategy, pixels);
    Ok(())
}

fn dispatch(
    ctx: &FrameContext,
    width: u32,
    height: u32,
    strategy: RenderStrategy,
    pixels: &mut [u32],
) {
    let start = std::time::Instant::now();
    match strategy {
        RenderStrategy::Serial => render_serial(ctx, width, height, pixels),
        RenderStrategy::Tiled { tile_size } => {
            render_tiled(ctx, width, height, tile_size.max(1), pixels)
        }
    }
    info!("Frame {}x{} rendered in {:.2?}", width, height, start.elapsed());
}

fn render_serial(ctx: &FrameContext, width: u32, height: u32, pixels: &mut [u32]) {
    info!("Rendering serially on one core...");
    let progress = progress_for(height as u64);
    for y in 0..height {
        for x in 0..width {
            pixels[y as usize * width as usize + x as usize] =
                trace_pixel(ctx.scene, ctx.camera, ctx.settings, x, y, width, height);
        }
        progress.inc(1);
    }
    progress.finish();
}

fn render_tiled(ctx: &FrameContext, width: u32, height: u32, tile_size: u32, pixels: &mut [u32]) {
    info!(
        "Rendering {}px tiles using {} CPU cores...",
        tile_size,
        rayon::current_num_threads()
    );
    let tiles = tile_grid(width, height, tile_size);
    let progress = progress_for(tiles.len() as u64);

    let rendered: Vec<(Tile, Vec<u32>)> = tiles
        .into_par_iter()
        .map(|tile| {
            let mut colors = Vec::with_capacity(tile.width as usize * tile.height as usize);
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    colors.push(trace_pixel(ctx.scene, ctx.camera, ctx.settings, x, y, width, height));
                }
            }
            progress.inc(1);
            (tile, colors)
        })
        .collect();
    progress.finish();

    // Copy-back runs on one thread in tile order, so the assembled frame
    // never depends on worker scheduling.
    for (tile, colors) in rendered {
        let mut cursor = 0;
        for y in tile.y..tile.y + tile.height {
            let row = y as usize * width as usize + tile.x as usize;
            pixels[row..row + tile.width as usize]
                .copy_from_slice(&colors[cursor..cursor + tile.width as usize]);
            cursor += tile.width as usize;
        }
    }
}

fn progress_for(length: u64) -> ProgressBar {
    let progress = ProgressBar::new(length);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap(),
    );
    progress
}

/// One rectangular slice of the viewport, dispatched as a unit.
#[derive(Debug, Clone, Copy)]
struct Tile {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Cut the viewport into tiles in row-major order. Edge tiles shrink to fit
/// viewports that are not multiples of the tile size.
fn tile_grid(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();
    let mut y = 0;
    while y < height {
        let tile_height = tile_size.min(height - y);
        let mut x = 0;
        while x < width {
            let tile_width = tile_size.min(width - x);
            tiles.push(Tile { x, y, width: tile_width, height: tile_height });
            x += tile_size;
        }
        y += tile_size;
    }
    tiles
}
