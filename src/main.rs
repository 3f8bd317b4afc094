use clap::Parser;
use glam::Vec3A;
use log::info;

mod cli;
mod logger;
mod output;
mod random;

use cli::{Args, StrategyArg};
use logger::init_logger;
use lumenray::body::Body;
use lumenray::camera::Camera;
use lumenray::renderer::{render, FrameContext};
use lumenray::scene::Scene;
use lumenray::settings::{RayTracingSettings, RenderStrategy};
use lumenray::skybox::Skybox;
use output::save_png;

/// Create the demo scene: a light, the checkerboard ground, three feature
/// spheres and a seeded scattering of smaller ones.
fn create_scene(
    sphere_count: u32,
    seed: u64,
    skybox: Skybox,
) -> Result<Scene, Box<dyn std::error::Error>> {
    let mut bodies = vec![
        Body::Light {
            position: Vec3A::new(1.0, 3.0, -1.5),
            radius: 0.4,
            color: Vec3A::ONE,
        },
        Body::Plane { height: 0.0, reflectivity: 16.0 },
    ];

    // Three large feature spheres
    bodies.push(Body::Sphere {
        position: Vec3A::new(0.0, 1.0, 0.0),
        radius: 1.0,
        color: Vec3A::new(0.95, 0.95, 0.95),
        reflectivity: 110.0,
    });
    bodies.push(Body::Sphere {
        position: Vec3A::new(-2.2, 0.75, 1.0),
        radius: 0.75,
        color: Vec3A::new(0.85, 0.25, 0.2),
        reflectivity: 40.0,
    });
    bodies.push(Body::Sphere {
        position: Vec3A::new(2.2, 0.6, 0.8),
        radius: 0.6,
        color: Vec3A::new(0.2, 0.45, 0.85),
        reflectivity: 72.0,
    });

    let mut rng = random::seeded(seed);
    for _ in 0..sphere_count {
        let radius = random::random_f32_range(&mut rng, 0.18, 0.45);
        let spot = random::random_on_ground_disk(&mut rng, 5.5);

        // Don't place spheres too close to the large feature spheres
        if spot.length() > 1.9 {
            bodies.push(Body::Sphere {
                position: Vec3A::new(spot.x, radius, spot.z),
                radius,
                color: random::random_color_range(&mut rng, 0.15, 0.95),
                reflectivity: random::random_f32_range(&mut rng, 0.0, 96.0),
            });
        }
    }

    Scene::new(bodies, skybox)
}

/// Create camera with default framing for the demo scene
fn create_camera(fov: f32) -> Camera {
    Camera::new(Vec3A::new(0.0, 1.6, -6.5), 0.0, 6.0, fov)
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("LumenRay - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, shadow samples: {}, bounces: {}",
        args.width, args.height, args.shadow_samples, args.bounces
    );

    let skybox = match &args.skybox {
        Some(path) => match Skybox::load(path) {
            Ok(skybox) => skybox,
            Err(e) => {
                log::error!("Failed to load skybox: {}", e);
                std::process::exit(1);
            }
        },
        None => Skybox::gradient(1024, 512),
    };

    let scene = match create_scene(args.spheres, args.seed, skybox) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };
    info!("Scene holds {} bodies", scene.body_count());

    let camera = create_camera(args.fov);
    let settings = RayTracingSettings {
        shadow_samples: args.shadow_samples,
        reflection_bounces: args.bounces,
    };
    let ctx = FrameContext::new(&scene, &camera, &settings);

    if args.bench {
        run_benchmark(&ctx, args.width, args.height, args.tile_size);
        return;
    }

    let strategy = match args.strategy {
        StrategyArg::Serial => RenderStrategy::Serial,
        StrategyArg::Tiled => RenderStrategy::Tiled { tile_size: args.tile_size },
    };
    let pixels = render(&ctx, args.width, args.height, strategy);
    save_png(&pixels, args.width, args.height, &args.output);
}

/// Run benchmark rendering the same frame serially and tiled
fn run_benchmark(ctx: &FrameContext, width: u32, height: u32, tile_size: u32) {
    use std::time::Instant;

    info!("Starting benchmark mode - comparing serial and tiled dispatch");
    info!("Resolution: {}x{}", width, height);

    // 1. Serial rendering
    info!("Serial rendering...");
    let serial_start = Instant::now();
    let serial = render(ctx, width, height, RenderStrategy::Serial);
    let serial_time = serial_start.elapsed();
    save_png(&serial, width, height, "bench_serial.png");
    info!("Serial: {:.2}s - saved as bench_serial.png", serial_time.as_secs_f32());

    // 2. Tiled rendering
    info!("Tiled rendering...");
    let tiled_start = Instant::now();
    let tiled = render(ctx, width, height, RenderStrategy::Tiled { tile_size });
    let tiled_time = tiled_start.elapsed();
    save_png(&tiled, width, height, "bench_tiled.png");
    info!("Tiled: {:.2}s - saved as bench_tiled.png", tiled_time.as_secs_f32());

    if serial == tiled {
        info!("Outputs are bit-identical across strategies");
    } else {
        log::warn!("Outputs differ between serial and tiled dispatch");
    }

    // Summary table
    info!("================== BENCHMARK RESULTS ==================");
    info!("Resolution: {}x{}, tile size: {}px", width, height, tile_size);
    info!("-------------------------------------------------------");
    info!("Serial:  {:>8.2}s      1.0x    bench_serial.png", serial_time.as_secs_f32());
    let speedup = serial_time.as_secs_f32() / tiled_time.as_secs_f32().max(1e-6);
    info!(
        "Tiled:   {:>8.2}s    {:>6.1}x    bench_tiled.png ({} threads)",
        tiled_time.as_secs_f32(),
        speedup,
        rayon::current_num_threads()
    );
    info!("=======================================================");
}
