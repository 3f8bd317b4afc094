//! LumenRay ray tracer
//!
//! Renders scenes of spheres over a checkerboard ground plane, lit by a
//! spherical light with soft shadows, specular reflections and a skybox
//! environment. The per-pixel kernel is a pure function of scene, camera
//! and settings; the renderer dispatches it either serially or across
//! rayon worker tiles with bit-identical results.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod body;
pub mod scene;
pub mod skybox;
pub mod camera;
pub mod intersect;
pub mod shadow;
pub mod shading;
pub mod tracer;
pub mod settings;
pub mod renderer;
