//! Ray-object intersection protocol.

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Information about a ray-object intersection.
///
/// Filled in by `Hittable::hit`; passed by mutable reference so the hot
/// loop performs no allocation.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// World-space hit position.
    pub point: Vec3,
    /// Unit-length normal at the hit, always oriented against the
    /// incoming ray (see `set_face_normal`).
    pub normal: Vec3,
    /// Ray parameter at the hit.
    pub t: f64,
    /// True if the ray hit the front (outward-facing) side.
    pub front_face: bool,
    /// Material to scatter with next.
    pub material: Material,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            t: 0.0,
            front_face: false,
            material: Material::Lambertian { albedo: Vec3::ZERO },
        }
    }
}

impl HitRecord {
    /// Record the surface orientation relative to the incoming ray.
    ///
    /// `outward_normal` must be unit length. After this call `normal`
    /// points against `ray`, and `front_face` is true iff the ray
    /// arrived from outside the surface.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Objects that rays can intersect.
///
/// Implementations must be thread-safe; the scene is read concurrently
/// by all render workers.
pub trait Hittable: Sync + Send {
    /// Test for intersection with `ray` at a parameter strictly inside
    /// `ray_t`. Returns true and fills `rec` on a hit; `rec` is left
    /// untouched on a miss.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;

    /// Conservative axis-aligned bounds of the object.
    fn bounding_box(&self) -> Aabb;
}
