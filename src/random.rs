//! Random number generation for rendering.
//!
//! Every worker owns its own `Rand`; generators are never shared. A
//! non-zero seed plus a stream index reproduces the exact same draw
//! sequence, which is what makes seeded renders bit-identical
//! regardless of how work is scheduled.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;

use crate::vec3::Vec3;

/// Owned pseudo-random stream with the sampling helpers the tracer
/// needs. Cheap to construct, not shareable across threads by design.
#[derive(Debug, Clone)]
pub struct Rand {
    rng: ChaCha20Rng,
}

impl Rand {
    /// Generator seeded from OS entropy; draws differ on every call.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic generator for the given seed (stream 0).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Deterministic generator for `(seed, stream)`. Distinct streams
    /// over the same seed are statistically independent.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// Random f64 in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.random()
    }

    /// Random f64 in [min, max).
    pub fn uniform_in(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.uniform()
    }

    /// Random vector with each component in [0, 1).
    pub fn random_vec3(&mut self) -> Vec3 {
        Vec3::new(self.uniform(), self.uniform(), self.uniform())
    }

    /// Random vector with each component in [min, max).
    pub fn random_vec3_in(&mut self, min: f64, max: f64) -> Vec3 {
        Vec3::new(
            self.uniform_in(min, max),
            self.uniform_in(min, max),
            self.uniform_in(min, max),
        )
    }

    /// Random unit vector uniformly distributed on the unit sphere.
    ///
    /// Samples three independent standard normals and normalizes,
    /// retrying in the (astronomically rare) case of a near-zero
    /// radius. Fastest of the variants here and exactly
    /// sphere-uniform.
    pub fn random_unit_vector(&mut self) -> Vec3 {
        loop {
            let x: f64 = self.rng.sample(StandardNormal);
            let y: f64 = self.rng.sample(StandardNormal);
            let z: f64 = self.rng.sample(StandardNormal);
            let radius = (x * x + y * y + z * z).sqrt();
            if radius > 1e-24 {
                return Vec3::new(x / radius, y / radius, z / radius);
            }
        }
    }

    /// Random unit vector via spherical coordinates (uniform angle plus
    /// uniform z). Also sphere-uniform, kept for comparison.
    pub fn random_unit_vector_angle(&mut self) -> Vec3 {
        let angle = self.uniform() * 2.0 * std::f64::consts::PI;
        let z = self.uniform() * 2.0 - 1.0;
        let radius = (1.0 - z * z).sqrt();
        Vec3::new(radius * angle.cos(), radius * angle.sin(), z)
    }

    /// Random unit vector on the hemisphere oriented by `normal`.
    pub fn random_on_hemisphere(&mut self, normal: Vec3) -> Vec3 {
        let on_unit_sphere = self.random_unit_vector();
        if on_unit_sphere.dot(normal) > 0.0 {
            on_unit_sphere
        } else {
            -on_unit_sphere
        }
    }

    /// Random point (x, y) uniformly inside a disc of the given radius,
    /// via rejection sampling.
    pub fn sample_disc(&mut self, radius: f64) -> (f64, f64) {
        loop {
            let x = 2.0 * self.uniform() - 1.0;
            let y = 2.0 * self.uniform() - 1.0;
            if x * x + y * y <= 1.0 {
                return (radius * x, radius * y);
            }
        }
    }

    /// Random point inside a disc via the angle method.
    pub fn sample_disc_angle(&mut self, radius: f64) -> (f64, f64) {
        let theta = 2.0 * std::f64::consts::PI * self.uniform();
        let rad = radius * self.uniform().sqrt();
        (rad * theta.cos(), rad * theta.sin())
    }
}
