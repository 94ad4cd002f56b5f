//! Render driver: owns the image buffer and fans rows out to workers.
//!
//! The image is split into contiguous row bands; a fixed-size worker
//! pool drains them from a shared queue so bands that scatter deeper
//! than others balance out dynamically. Every row derives its own RNG
//! stream from the tracer seed, which makes a seeded render
//! bit-identical regardless of the worker count or scheduling order.

use image::RgbaImage;
use log::info;
use rayon::iter::{ParallelBridge, ParallelIterator};
use rayon::ThreadPoolBuilder;

use crate::camera::Camera;
use crate::color::{to_srgba, Color};
use crate::random::Rand;
use crate::scene::Scene;

/// Callback invoked with a pixel-count delta as rendering progresses;
/// called concurrently from worker threads.
pub type ProgressFn = Box<dyn Fn(usize) + Send + Sync>;

/// Path-tracing engine: camera, sampling parameters and the output
/// RGBA8 buffer.
pub struct Tracer {
    /// Camera used to generate primary rays.
    pub camera: Camera,
    /// Maximum number of ray bounces. 0 picks the default of 10.
    pub max_depth: u32,
    /// Rays averaged per pixel. 0 picks the default of 1.
    pub num_rays_per_pixel: u32,
    /// Sub-pixel jitter radius for antialiasing. <= 0 picks the
    /// default of 0.5.
    pub ray_radius: f64,
    /// Number of parallel workers. 0 picks the logical CPU count.
    pub num_workers: usize,
    /// Seed for the per-row random streams. 0 randomizes every render.
    pub seed: u64,
    /// Optional progress callback, invoked once per row with the row
    /// width. Must tolerate concurrent calls.
    pub progress_func: Option<ProgressFn>,
    width: u32,
    height: u32,
    image: RgbaImage,
}

/// Immutable per-render state shared by all workers.
struct RenderParams {
    camera: Camera,
    max_depth: u32,
    num_rays_per_pixel: u32,
    ray_radius: f64,
    seed: u64,
    width: u32,
}

impl Tracer {
    /// Create a tracer with an allocated RGBA8 buffer. Both dimensions
    /// must be positive.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        Self {
            camera: Camera::default(),
            max_depth: 0,
            num_rays_per_pixel: 0,
            ray_radius: 0.0,
            num_workers: 0,
            seed: 0,
            progress_func: None,
            width,
            height,
            image: RgbaImage::new(width, height),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render the scene and return the finished buffer.
    ///
    /// Applies defaults for unset parameters, initializes the camera,
    /// then renders every pixel. With one worker the whole image is
    /// traced on the calling thread; otherwise row bands are drained by
    /// a pool of `num_workers` threads.
    pub fn render(&mut self, scene: &Scene) -> &RgbaImage {
        if self.max_depth == 0 {
            self.max_depth = 10;
        }
        if self.num_rays_per_pixel == 0 {
            self.num_rays_per_pixel = 1;
        }
        if self.ray_radius <= 0.0 {
            self.ray_radius = 0.5;
        }
        if self.num_workers == 0 {
            self.num_workers = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
        }

        self.camera.initialize(self.width, self.height);
        let camera = self.camera;
        assert!(
            camera.position.is_finite()
                && camera.look_at.is_finite()
                && camera.up.is_finite()
                && camera.vertical_fov.is_finite()
                && camera.focal_length.is_finite()
                && camera.focus_distance.is_finite()
                && camera.aperture.is_finite(),
            "camera parameters must be finite"
        );

        info!(
            "Rendering {}x{} with {} rays/pixel, depth {}, {} workers",
            self.width, self.height, self.num_rays_per_pixel, self.max_depth, self.num_workers
        );

        let params = RenderParams {
            camera,
            max_depth: self.max_depth,
            num_rays_per_pixel: self.num_rays_per_pixel,
            ray_radius: self.ray_radius,
            seed: self.seed,
            width: self.width,
        };
        let progress = self.progress_func.as_deref();
        let row_bytes = self.width as usize * 4;
        let num_workers = self.num_workers;
        let height = self.height as usize;
        let buf: &mut [u8] = &mut self.image;

        if num_workers == 1 {
            // Single worker renders the whole image on the calling
            // thread.
            render_rows(&params, scene, progress, 0, buf);
        } else {
            // Bands are smaller than a worker's fair share so slow
            // bands redistribute across the pool.
            let band_rows = std::cmp::max(4, height / (num_workers * 4));
            let pool = ThreadPoolBuilder::new()
                .num_threads(num_workers)
                .build()
                .expect("failed to build render worker pool");
            pool.install(|| {
                buf.chunks_mut(band_rows * row_bytes)
                    .enumerate()
                    .par_bridge()
                    .for_each(|(band, rows)| {
                        render_rows(&params, scene, progress, (band * band_rows) as u32, rows);
                    });
            });
        }

        &self.image
    }
}

/// Render a contiguous run of rows starting at `y_start` into `rows`.
fn render_rows(
    params: &RenderParams,
    scene: &Scene,
    progress: Option<&(dyn Fn(usize) + Send + Sync)>,
    y_start: u32,
    rows: &mut [u8],
) {
    let width = params.width as usize;
    let row_bytes = width * 4;
    let multiple_rays = params.num_rays_per_pixel > 1;
    let color_scale = 1.0 / params.num_rays_per_pixel as f64;

    for (dy, row) in rows.chunks_mut(row_bytes).enumerate() {
        let y = y_start + dy as u32;
        if let Some(report) = progress {
            report(width);
        }
        let mut rng = row_rng(params.seed, y);
        for x in 0..width {
            let mut color_sum = Color::ZERO;
            for _ in 0..params.num_rays_per_pixel {
                // Jitter within the pixel only when averaging several
                // rays; a single ray goes through the center.
                let (offset_x, offset_y) = if multiple_rays {
                    rng.sample_disc(params.ray_radius)
                } else {
                    (0.0, 0.0)
                };
                let ray = params
                    .camera
                    .get_ray(&mut rng, x as f64, y as f64, offset_x, offset_y);
                color_sum += scene.ray_color(&ray, params.max_depth, &mut rng);
            }
            let pixel = to_srgba(color_sum * color_scale);
            row[x * 4..x * 4 + 4].copy_from_slice(&pixel);
        }
    }
}

/// Random stream for one row: seeded streams reproduce exactly, seed 0
/// draws fresh OS entropy.
fn row_rng(seed: u64, row: u32) -> Rand {
    if seed != 0 {
        Rand::for_stream(seed, row as u64)
    } else {
        Rand::from_entropy()
    }
}
