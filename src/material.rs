//! Material scattering models.
//!
//! Three materials: Lambertian (diffuse), Metal (specular with optional
//! fuzz) and Dielectric (transparent with Fresnel reflection). Dispatch
//! is a small enum match so the scatter path stays monomorphic.

use crate::color::Color;
use crate::hittable::HitRecord;
use crate::random::Rand;
use crate::ray::Ray;
use crate::vec3::{near_zero, reflect, refract, Vec3};

/// Surface material of a scene object.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    /// Diffuse material for matte surfaces.
    Lambertian {
        /// Surface reflectance, each channel in [0, 1].
        albedo: Color,
    },
    /// Metallic material with mirror reflection.
    Metal {
        /// Metal tint.
        albedo: Color,
        /// Roughness: magnitude of the random perturbation added to the
        /// reflection. 0 is a perfect mirror; values above 1 start to
        /// absorb rays at grazing angles.
        fuzz: f64,
    },
    /// Transparent material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass).
        refraction_index: f64,
    },
}

impl Material {
    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns the per-channel attenuation and the scattered ray, or
    /// `None` when the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut Rand) -> Option<(Color, Ray)> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, rec, rng),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, ray_in, rec, rng)
            }
        }
    }
}

fn scatter_lambertian(albedo: Color, rec: &HitRecord, rng: &mut Rand) -> Option<(Color, Ray)> {
    let mut scatter_direction = rec.normal + rng.random_unit_vector();
    // Catch degenerate scatter direction.
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }
    Some((albedo, Ray::new(rec.point, scatter_direction)))
}

fn scatter_metal(
    albedo: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut Rand,
) -> Option<(Color, Ray)> {
    let mut reflected = reflect(ray_in.direction.normalize(), rec.normal);
    if fuzz > 0.0 {
        reflected += fuzz * rng.random_unit_vector();
    }
    if reflected.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.point, reflected)))
    } else {
        // Fuzzed reflection went below the surface: absorbed.
        None
    }
}

fn scatter_dielectric(
    refraction_index: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut Rand,
) -> Option<(Color, Ray)> {
    let attenuation = Vec3::ONE;
    let refraction_ratio = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = ray_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let direction = if cannot_refract || reflectance(cos_theta, refraction_ratio) > rng.uniform() {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, refraction_ratio)
    };

    Some((attenuation, Ray::new(rec.point, direction)))
}

/// Schlick's approximation of the Fresnel reflectance.
fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
