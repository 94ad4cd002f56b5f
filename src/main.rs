use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

mod cli;
mod logger;
mod output;

use cli::{Args, ScenePreset};
use logger::init_logger;
use lumipath::{Camera, Rand, Scene, Tracer};
use output::save_image_as_png;

/// Build the selected scene together with its camera preset.
fn build_scene(preset: ScenePreset, seed: u64) -> (Scene, Camera) {
    match preset {
        ScenePreset::Default => (Scene::default_scene(), Camera::default_scene_camera()),
        ScenePreset::Rich => {
            let mut rng = if seed != 0 {
                Rand::seeded(seed)
            } else {
                Rand::from_entropy()
            };
            (Scene::rich_scene(&mut rng), Camera::rich_scene_camera())
        }
    }
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("Lumipath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if args.bench {
        run_benchmark(&args);
        return;
    }

    let (scene, camera) = build_scene(args.scene, args.seed);
    info!(
        "Image resolution: {}x{}, rays per pixel: {}, scene objects: {}",
        args.width,
        args.height,
        args.rays,
        scene.objects.len()
    );

    let mut tracer = Tracer::new(args.width, args.height);
    tracer.camera = camera;
    tracer.max_depth = args.max_depth;
    tracer.num_rays_per_pixel = args.rays;
    tracer.num_workers = args.workers;
    tracer.seed = args.seed;

    let pb = ProgressBar::new(u64::from(args.width) * u64::from(args.height));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .expect("static progress template is valid"),
    );
    let bar = pb.clone();
    tracer.progress_func = Some(Box::new(move |delta| bar.inc(delta as u64)));

    let render_start = Instant::now();
    let image = tracer.render(&scene);
    pb.finish();
    info!("Image generated in {:.2?}", render_start.elapsed());

    if !args.output.is_empty() {
        if let Err(e) = save_image_as_png(image, &args.output) {
            log::error!("Could not save image to {:?}: {}", args.output, e);
            std::process::exit(1);
        }
    }
}

/// Render the rich scene with 1, half, and all logical workers and log
/// a timing table.
fn run_benchmark(args: &Args) {
    let width = 800;
    let height = 450;
    let all_workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let seed = if args.seed != 0 { args.seed } else { 7 };
    let (scene, camera) = build_scene(ScenePreset::Rich, seed);

    info!("Benchmark: {}x{}, {} rays/pixel, depth {}, seed {}", width, height, args.rays, args.max_depth, seed);

    let mut worker_counts = vec![1];
    if all_workers >= 4 {
        worker_counts.push(all_workers / 2);
    }
    if all_workers > 1 {
        worker_counts.push(all_workers);
    }

    let mut results = Vec::new();
    for workers in worker_counts {
        let mut tracer = Tracer::new(width, height);
        tracer.camera = camera;
        tracer.max_depth = args.max_depth;
        tracer.num_rays_per_pixel = args.rays;
        tracer.num_workers = workers;
        tracer.seed = seed;

        let start = Instant::now();
        let _ = tracer.render(&scene);
        let elapsed = start.elapsed();
        info!("{} workers: {:.2}s", workers, elapsed.as_secs_f64());
        results.push((workers, elapsed));
    }

    info!("================ BENCHMARK RESULTS ================");
    let baseline = results[0].1.as_secs_f64();
    for (workers, elapsed) in results {
        let speedup = baseline / elapsed.as_secs_f64();
        info!(
            "{:>3} workers:  {:>8.2}s    {:>5.1}x",
            workers,
            elapsed.as_secs_f64(),
            speedup
        );
    }
    info!("===================================================");
}
