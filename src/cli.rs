use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Dispatch strategy names accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Single thread walking every pixel
    Serial,
    /// Square tiles spread across the rayon thread pool
    Tiled,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lumenray")]
#[command(about = "A small CPU ray tracer with soft shadows, reflections and a skybox")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600", help = "Image height in pixels")]
    pub height: u32,

    /// Soft-shadow feeler rays per shaded point (0 disables shadows)
    #[arg(long, short = 's', default_value = "8", help = "Soft-shadow feeler rays per shaded point")]
    pub shadow_samples: u32,

    /// Reflection bounce limit (0 disables reflections)
    #[arg(long, short = 'b', default_value = "2", help = "Reflection bounce limit")]
    pub bounces: u32,

    /// Pixel dispatch strategy
    #[arg(long, value_enum, default_value = "tiled", help = "Pixel dispatch strategy")]
    pub strategy: StrategyArg,

    /// Tile edge length in pixels for the tiled strategy
    #[arg(long, default_value = "16", help = "Tile edge length in pixels for the tiled strategy")]
    pub tile_size: u32,

    /// Number of randomly placed spheres in the demo scene
    #[arg(long, default_value = "6", help = "Number of randomly placed spheres in the demo scene")]
    pub spheres: u32,

    /// Seed for the random sphere placement
    #[arg(long, default_value = "7", help = "Seed for the random sphere placement")]
    pub seed: u64,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "60", help = "Vertical field of view in degrees")]
    pub fov: f32,

    /// Equirectangular skybox image (gradient sky when omitted)
    #[arg(long, help = "Equirectangular skybox image (gradient sky when omitted)")]
    pub skybox: Option<PathBuf>,

    /// Output file path (PNG)
    #[arg(short, long, default_value = "render.png", help = "Output file path (PNG)")]
    pub output: String,

    /// Render the same frame serially and tiled and compare timings
    #[arg(long, help = "Render the same frame serially and tiled and compare timings")]
    pub bench: bool,
}
