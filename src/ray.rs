//! Ray representation.
//!
//! A ray is r(t) = origin + t * direction, a semi-infinite line in 3D
//! space used for intersection testing.

use crate::vec3::Vec3;

/// Ray in 3D space defined by origin and direction.
///
/// The direction is not required to be normalized; intersection code
/// accounts for its length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3,
    /// Direction vector of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute the point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + t * self.direction
    }
}
