//! Vector helpers on top of glam.
//!
//! Points, directions and linear RGB all share the same 3-component
//! f64 vector type; the handful of operations glam does not provide in
//! the exact form the tracer needs live here.

use glam::DVec3;

/// 3D vector of f64 components, used for points, directions and colors.
pub type Vec3 = DVec3;

/// Returns true if the vector is close to zero in all dimensions.
pub fn near_zero(v: Vec3) -> bool {
    const S: f64 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Reflect vector `v` around normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `uv` through the surface with normal `n` using
/// Snell's law. `etai_over_etat` is the ratio of refractive indices.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
