//! Camera model and primary ray generation.
//!
//! A pinhole camera with an optional thin lens for depth of field. The
//! public fields are configuration; `initialize` fills in defaults for
//! zero-valued fields and computes the viewport basis, and must run
//! before `get_ray`.

use crate::random::Rand;
use crate::ray::Ray;
use crate::vec3::{near_zero, Vec3};

/// Camera configuration plus the viewport derived from it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Where the camera sits in world space.
    pub position: Vec3,
    /// The point the camera looks at; with `position` this defines the
    /// view direction.
    pub look_at: Vec3,
    /// Upward direction controlling roll around the view axis.
    /// Defaults to (0, 1, 0).
    pub up: Vec3,
    /// Vertical field of view in degrees. Defaults to 90.
    pub vertical_fov: f64,
    /// Distance from the camera to the image plane. Defaults to 1.
    pub focal_length: f64,
    /// Distance to the plane of perfect focus. Defaults to
    /// `focal_length`.
    pub focus_distance: f64,
    /// Lens diameter. Zero means pinhole (no blur).
    pub aperture: f64,

    // Computed by initialize().
    pixel00: Vec3,
    pixel_x_vector: Vec3,
    pixel_y_vector: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
            up: Vec3::ZERO,
            vertical_fov: 0.0,
            focal_length: 0.0,
            focus_distance: 0.0,
            aperture: 0.0,
            pixel00: Vec3::ZERO,
            pixel_x_vector: Vec3::ZERO,
            pixel_y_vector: Vec3::ZERO,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }
}

impl Camera {
    /// Camera preset for the random-sphere showcase scene: telephoto
    /// shot from (13, 2, 3) toward the origin with a slight defocus
    /// blur focused 10 units out.
    pub fn rich_scene_camera() -> Self {
        Self {
            position: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            up: Vec3::new(0.0, 1.0, 0.0),
            vertical_fov: 20.0,
            aperture: 0.1,
            focus_distance: 10.0,
            ..Self::default()
        }
    }

    /// Camera preset framing the five-sphere showcase scene.
    pub fn default_scene_camera() -> Self {
        let position = Vec3::new(-2.0, 2.0, 1.0);
        let look_at = Vec3::new(0.0, 0.0, -1.0);
        Self {
            position,
            look_at,
            vertical_fov: 20.0,
            aperture: 0.1,
            focus_distance: (position - look_at).length(),
            ..Self::default()
        }
    }

    /// Compute the viewport for the given image dimensions, applying
    /// defaults for any zero-valued configuration field. Must be called
    /// before `get_ray`.
    pub fn initialize(&mut self, width: u32, height: u32) {
        if self.focal_length == 0.0 {
            self.focal_length = 1.0;
        }
        if self.vertical_fov == 0.0 {
            self.vertical_fov = 90.0;
        }
        if self.up == Vec3::ZERO {
            self.up = Vec3::new(0.0, 1.0, 0.0);
        }
        if self.focus_distance == 0.0 {
            self.focus_distance = self.focal_length;
        }
        // A camera at the origin looking nowhere looks down -Z.
        if self.position == Vec3::ZERO && self.look_at == Vec3::ZERO {
            self.look_at = Vec3::new(0.0, 0.0, -1.0);
        }

        let mut view_direction = self.position - self.look_at;
        if near_zero(view_direction) {
            // Position == look_at leaves the view direction undefined.
            view_direction = Vec3::Z;
        }

        // Right-handed orthonormal camera frame: w points from the
        // target back to the camera, u to the right, v up.
        let w = view_direction.normalize();
        let u = self.up.cross(w).normalize();
        let v = w.cross(u);

        // Lens disk basis; the disk radius is half the aperture.
        let defocus_radius = self.aperture / 2.0;
        self.defocus_disk_u = u * defocus_radius;
        self.defocus_disk_v = v * defocus_radius;

        // Viewport dimensions from the vertical field of view:
        // viewport_height = 2 * focal_length * tan(fov / 2).
        let theta = self.vertical_fov.to_radians();
        let viewport_height = 2.0 * self.focal_length * (theta / 2.0).tan();
        let aspect_ratio = width as f64 / height as f64;
        let viewport_width = aspect_ratio * viewport_height;

        // Image y grows downward while world v points up.
        let horizontal = u * viewport_width;
        let vertical = -v * viewport_height;
        self.pixel_x_vector = horizontal / width as f64;
        self.pixel_y_vector = vertical / height as f64;
        // Upper-left corner of the viewport; the half-pixel offset to
        // the center of pixel (0,0) is applied in get_ray.
        self.pixel00 =
            self.position - w * self.focal_length - horizontal * 0.5 - vertical * 0.5;
    }

    /// Generate a ray through pixel (x, y).
    ///
    /// The offsets shift the sample within the pixel: (0, 0) is the
    /// pixel center, (-0.5, -0.5) the upper-left corner. With a
    /// non-zero aperture the origin is jittered across the lens disk
    /// and the direction re-aimed at the focus plane.
    pub fn get_ray(
        &self,
        rng: &mut Rand,
        pixel_x: f64,
        pixel_y: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> Ray {
        let pixel_sample = self.pixel00
            + self.pixel_x_vector * (pixel_x + 0.5 + offset_x)
            + self.pixel_y_vector * (pixel_y + 0.5 + offset_y);

        let mut origin = self.position;
        let mut direction = pixel_sample - self.position;

        if self.aperture > 0.0 {
            let (dx, dy) = rng.sample_disc(1.0);
            let lens_offset = self.defocus_disk_u * dx + self.defocus_disk_v * dy;

            // Where the center ray meets the focus plane.
            let focus_time = self.focus_distance / self.focal_length;
            let focus_point = self.position + direction * focus_time;

            origin = self.position + lens_offset;
            direction = focus_point - origin;
        }

        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn initialize_applies_defaults() {
        let mut camera = Camera::default();
        camera.initialize(100, 100);

        assert_eq!(camera.focal_length, 1.0);
        assert_eq!(camera.vertical_fov, 90.0);
        assert_eq!(camera.up, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.focus_distance, 1.0);
        assert_eq!(camera.look_at, Vec3::new(0.0, 0.0, -1.0));
        assert_ne!(camera.pixel_x_vector, Vec3::ZERO);
        assert_ne!(camera.pixel_y_vector, Vec3::ZERO);
    }

    #[test]
    fn initialize_preserves_custom_values() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            vertical_fov: 60.0,
            focal_length: 2.0,
            ..Camera::default()
        };
        camera.initialize(100, 100);

        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.look_at, Vec3::ZERO);
        assert_eq!(camera.vertical_fov, 60.0);
        assert_eq!(camera.focal_length, 2.0);
    }

    #[test]
    fn initialize_handles_position_equal_to_look_at() {
        let mut camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            look_at: Vec3::new(1.0, 2.0, 3.0),
            ..Camera::default()
        };
        camera.initialize(100, 100);
        // Falls back to looking down -Z without producing NaNs.
        assert!(camera.pixel00.is_finite());
        assert!(camera.pixel_x_vector.is_finite());
        assert!(camera.pixel_y_vector.is_finite());
    }

    #[test]
    fn focus_distance_defaults_to_focal_length() {
        let mut camera = Camera {
            focal_length: 2.5,
            ..Camera::default()
        };
        camera.initialize(100, 100);
        assert_eq!(camera.focus_distance, 2.5);
    }

    #[test]
    fn center_pixel_looks_down_view_axis() {
        let mut camera = Camera::default();
        camera.initialize(100, 100);
        let mut rng = Rand::seeded(1);
        // Center of the viewport: direction straight down -Z.
        let ray = camera.get_ray(&mut rng, 49.5, 49.5, 0.0, 0.0);
        let dir = ray.direction.normalize();
        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(dir.z, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn pinhole_rays_share_origin() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            ..Camera::default()
        };
        camera.initialize(100, 100);
        let mut rng = Rand::seeded(2);

        for (x, y) in [(50.0, 50.0), (25.0, 75.0), (0.0, 0.0)] {
            let ray = camera.get_ray(&mut rng, x, y, 0.0, 0.0);
            assert_eq!(ray.origin, camera.position);
        }
    }

    #[test]
    fn aperture_jitters_origin_within_lens_disk() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            aperture: 0.5,
            focus_distance: 5.0,
            ..Camera::default()
        };
        camera.initialize(100, 100);
        let mut rng = Rand::seeded(3);

        let ray1 = camera.get_ray(&mut rng, 50.0, 50.0, 0.0, 0.0);
        let ray2 = camera.get_ray(&mut rng, 50.0, 50.0, 0.0, 0.0);
        assert_ne!(ray1.origin, ray2.origin);
        for ray in [ray1, ray2] {
            let dist = (ray.origin - camera.position).length();
            assert!(dist <= camera.aperture / 2.0 + 1e-12);
        }
    }

    #[test]
    fn lens_rays_converge_at_focus_plane() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            aperture: 0.4,
            focus_distance: 5.0,
            ..Camera::default()
        };
        camera.initialize(100, 100);
        let mut rng = Rand::seeded(4);

        // All lens samples of the same pixel pass through one point on
        // the focus plane.
        let reference = camera.get_ray(&mut rng, 30.0, 60.0, 0.0, 0.0);
        let focus_point = reference.at(1.0);
        for _ in 0..20 {
            let ray = camera.get_ray(&mut rng, 30.0, 60.0, 0.0, 0.0);
            let p = ray.at(1.0);
            assert_abs_diff_eq!(p.x, focus_point.x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, focus_point.y, epsilon = 1e-9);
            assert_abs_diff_eq!(p.z, focus_point.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn presets_are_framed_as_documented() {
        let rich = Camera::rich_scene_camera();
        assert_eq!(rich.position, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(rich.look_at, Vec3::ZERO);
        assert_eq!(rich.vertical_fov, 20.0);
        assert_eq!(rich.aperture, 0.1);
        assert_eq!(rich.focus_distance, 10.0);

        let showcase = Camera::default_scene_camera();
        assert_eq!(showcase.position, Vec3::new(-2.0, 2.0, 1.0));
        assert_abs_diff_eq!(
            showcase.focus_distance,
            (showcase.position - showcase.look_at).length(),
            epsilon = 1e-12
        );
    }
}
