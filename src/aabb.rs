//! Axis-aligned bounding boxes.
//!
//! Conservative bounds around scene objects, one interval per axis.
//! The slab test here is the building block for spatial pruning; the
//! renderer itself still intersects objects directly.

use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Axis-aligned bounding box: an interval per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb(pub [Interval; 3]);

impl Aabb {
    /// Box containing nothing.
    pub const EMPTY: Aabb = Aabb([Interval::EMPTY; 3]);

    /// Box spanning the two corner points, in either order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self([
            Interval::ordered(a.x, b.x),
            Interval::ordered(a.y, b.y),
            Interval::ordered(a.z, b.z),
        ])
    }

    /// Smallest box containing both inputs.
    pub fn union(box1: Aabb, box2: Aabb) -> Aabb {
        Aabb([
            Interval::union(box1.0[0], box2.0[0]),
            Interval::union(box1.0[1], box2.0[1]),
            Interval::union(box1.0[2], box2.0[2]),
        ])
    }

    /// Slab test: true if `ray` passes through the box within `ray_t`.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        let origin = ray.origin.to_array();
        let direction = ray.direction.to_array();
        for (axis, slab) in self.0.iter().enumerate() {
            let ad_inv = 1.0 / direction[axis];
            let t0 = (slab.min - origin[axis]) * ad_inv;
            let t1 = (slab.max - origin[axis]) * ad_inv;
            if t0 < t1 {
                ray_t.min = ray_t.min.max(t0);
                ray_t.max = ray_t.max.min(t1);
            } else {
                ray_t.min = ray_t.min.max(t1);
                ray_t.max = ray_t.max.min(t0);
            }
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }
}
