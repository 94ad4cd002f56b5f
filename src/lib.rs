//! Lumipath path tracer
//!
//! A CPU Monte-Carlo path tracer in the spirit of *Ray Tracing In One
//! Weekend*: spheres with Lambertian, metal and dielectric materials
//! under a sky gradient, rendered in parallel with reproducible
//! per-row random streams.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aabb;
pub mod camera;
pub mod color;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod random;
pub mod ray;
pub mod scene;
pub mod sphere;
pub mod tracer;
pub mod vec3;

pub use aabb::Aabb;
pub use camera::Camera;
pub use color::Color;
pub use material::Material;
pub use random::Rand;
pub use ray::Ray;
pub use scene::{AmbientLight, Scene};
pub use sphere::Sphere;
pub use tracer::Tracer;
pub use vec3::Vec3;
