//! Render quality and dispatch settings.

/// Quality knobs read by the shading kernel.
///
/// Plain scalars, copied around freely and read-only during a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayTracingSettings {
    /// Number of soft-shadow feeler rays per shaded point. Zero disables
    /// shadows entirely.
    pub shadow_samples: u32,
    /// Maximum number of reflection bounces per pixel. Zero disables
    /// reflections entirely.
    pub reflection_bounces: u32,
}

impl Default for RayTracingSettings {
    fn default() -> Self {
        Self {
            shadow_samples: 8,
            reflection_bounces: 2,
        }
    }
}

/// How the per-pixel kernel is dispatched across the viewport.
///
/// Both strategies run the identical pixel function; the choice affects
/// scheduling only, never the produced colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// One thread walks every pixel in row-major order.
    Serial,
    /// The viewport is cut into square tiles rendered on the rayon pool.
    Tiled {
        /// Tile edge length in pixels, clamped to at least 1.
        tile_size: u32,
    },
}

impl Default for RenderStrategy {
    fn default() -> Self {
        RenderStrategy::Tiled { tile_size: 16 }
    }
}
