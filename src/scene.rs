//! Scene aggregation, sky background and the radiance estimator.

use crate::aabb::Aabb;
use crate::color::Color;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::random::Rand;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::vec3::Vec3;

/// Sky background: a vertical gradient between two colors.
///
/// It is the only light source, so a scene without one renders black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Color at the bottom of the gradient (ray pointing down).
    pub color_a: Color,
    /// Color at the top of the gradient (ray pointing up).
    pub color_b: Color,
}

impl AmbientLight {
    /// Default sky: white blending into light blue.
    pub fn default_background() -> Self {
        Self {
            color_a: Color::new(1.0, 1.0, 1.0),
            color_b: Color::new(0.4, 0.65, 1.0),
        }
    }

    /// Color seen by a ray that escaped the scene, blended by the
    /// vertical component of its direction.
    pub fn sample(&self, ray: &Ray) -> Color {
        let unit = ray.direction.normalize();
        let a = 0.5 * (unit.y + 1.0);
        (1.0 - a) * self.color_a + a * self.color_b
    }
}

/// A renderable scene: an ordered list of objects plus the background.
/// Objects are immutable during rendering.
pub struct Scene {
    /// Intersectable objects, tested linearly.
    pub objects: Vec<Box<dyn Hittable>>,
    /// Sky gradient sampled by escaping rays.
    pub background: AmbientLight,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default sky.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            background: AmbientLight::default_background(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Find the closest intersection along `ray` within `interval`.
    pub fn hit(&self, ray: &Ray, interval: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = interval.max;
        for object in &self.objects {
            if object.hit(ray, Interval::new(interval.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }
        hit_anything
    }

    /// Conservative bounds of the whole scene; empty for an empty
    /// scene.
    pub fn bounding_box(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| Aabb::union(acc, object.bounding_box()))
    }

    /// Estimate the radiance arriving along `ray`, following scattered
    /// bounces up to `depth` deep.
    pub fn ray_color(&self, ray: &Ray, depth: u32, rng: &mut Rand) -> Color {
        // Bounce budget exhausted: no more light is gathered.
        if depth == 0 {
            return Color::ZERO;
        }
        let mut rec = HitRecord::default();
        if self.hit(ray, Interval::FRONT_EPSILON, &mut rec) {
            if let Some((attenuation, scattered)) = rec.material.scatter(ray, &rec, rng) {
                return attenuation * self.ray_color(&scattered, depth - 1, rng);
            }
            return Color::ZERO;
        }
        self.background.sample(ray)
    }

    /// Five-sphere showcase: a matte center sphere, a tinted ground, a
    /// glass sphere with an air bubble inside, and a fuzzy metal one.
    pub fn default_scene() -> Self {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.2),
            0.5,
            Material::Lambertian {
                albedo: Color::new(0.1, 0.2, 0.5),
            },
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Material::Lambertian {
                albedo: Color::new(0.7, 0.8, 0.1),
            },
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Material::Dielectric {
                refraction_index: 1.5,
            },
        )));
        // Air bubble inside the glass sphere.
        scene.add(Box::new(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.4,
            Material::Dielectric {
                refraction_index: 1.0 / 1.5,
            },
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Material::Metal {
                albedo: Color::new(1.0, 0.8, 0.8),
                fuzz: 0.05,
            },
        )));
        scene
    }

    /// Book-cover scene: a large ground sphere, a 22x22 grid of random
    /// small spheres, and three hero spheres.
    ///
    /// The draw order below is fixed; rendering the scene built from a
    /// given seeded generator is fully reproducible.
    pub fn rich_scene(rng: &mut Rand) -> Self {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Material::Lambertian {
                albedo: Color::new(0.5, 0.5, 0.5),
            },
        )));

        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = rng.uniform();
                let center = Vec3::new(
                    a as f64 + 0.9 * rng.uniform(),
                    0.2,
                    b as f64 + 0.9 * rng.uniform(),
                );

                // Keep clearance around the metal hero sphere.
                if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                    continue;
                }

                let material = if choose_mat < 0.8 {
                    Material::Lambertian {
                        albedo: rng.random_vec3() * rng.random_vec3(),
                    }
                } else if choose_mat < 0.95 {
                    Material::Metal {
                        albedo: rng.random_vec3_in(0.5, 1.0),
                        fuzz: rng.uniform() * 0.5,
                    }
                } else {
                    Material::Dielectric {
                        refraction_index: 1.5,
                    }
                };
                scene.add(Box::new(Sphere::new(center, 0.2, material)));
            }
        }

        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::Dielectric {
                refraction_index: 1.5,
            },
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Material::Lambertian {
                albedo: Color::new(0.4, 0.2, 0.1),
            },
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Material::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        )));
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn matte(albedo: Color) -> Material {
        Material::Lambertian { albedo }
    }

    #[test]
    fn background_gradient_endpoints_and_midpoint() {
        let sky = AmbientLight::default_background();

        // Straight down: pure color_a.
        let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let c = sky.sample(&down);
        assert_abs_diff_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 1.0, epsilon = 1e-12);

        // Straight up: pure color_b.
        let up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let c = sky.sample(&up);
        assert_abs_diff_eq!(c.x, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.65, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 1.0, epsilon = 1e-12);

        // Horizontal: even blend.
        let level = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let c = sky.sample(&level);
        assert_abs_diff_eq!(c.x, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.825, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn background_ignores_direction_length() {
        let sky = AmbientLight::default_background();
        let a = sky.sample(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.5, -0.5)));
        let b = sky.sample(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 5.0, -5.0)));
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn hit_returns_closest_object() {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            0.5,
            matte(Color::new(0.0, 1.0, 0.0)),
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            matte(Color::new(1.0, 0.0, 0.0)),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(scene.hit(&ray, Interval::FRONT_EPSILON, &mut rec));
        // Nearer sphere (listed second) wins.
        assert_abs_diff_eq!(rec.t, 0.5, epsilon = 1e-12);
        match rec.material {
            Material::Lambertian { albedo } => assert_eq!(albedo, Color::new(1.0, 0.0, 0.0)),
            _ => panic!("unexpected material"),
        }
        assert!(Interval::FRONT_EPSILON.surrounds(rec.t));
    }

    #[test]
    fn hit_respects_interval() {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            matte(Color::ONE),
        )));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        // Both roots lie beyond the interval end.
        assert!(!scene.hit(&ray, Interval::new(0.0, 0.4), &mut rec));
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(!scene.hit(&ray, Interval::FRONT_EPSILON, &mut rec));
    }

    #[test]
    fn ray_color_zero_depth_is_black() {
        let scene = Scene::default_scene();
        let mut rng = Rand::seeded(1);
        for dir in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, -1.0, 0.0),
        ] {
            let c = scene.ray_color(&Ray::new(Vec3::ZERO, dir), 0, &mut rng);
            assert_eq!(c, Color::ZERO);
        }
    }

    #[test]
    fn ray_color_empty_scene_is_background() {
        let scene = Scene::new();
        let mut rng = Rand::seeded(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let c = scene.ray_color(&ray, 10, &mut rng);
        assert_abs_diff_eq!(c.x, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.825, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_color_attenuates_bounces() {
        // Every albedo in the showcase scene is at most 1 per channel,
        // so radiance stays within the unit cube.
        let scene = Scene::default_scene();
        let mut rng = Rand::seeded(2);
        for _ in 0..100 {
            let dir = Vec3::new(
                rng.uniform_in(-1.0, 1.0),
                rng.uniform_in(-1.0, 1.0),
                -1.0,
            );
            let c = scene.ray_color(&Ray::new(Vec3::ZERO, dir), 10, &mut rng);
            for channel in [c.x, c.y, c.z] {
                assert!((0.0..=1.0).contains(&channel), "radiance {channel} out of range");
            }
        }
    }

    #[test]
    fn default_scene_composition() {
        let scene = Scene::default_scene();
        assert_eq!(scene.objects.len(), 5);
        assert_eq!(scene.background, AmbientLight::default_background());
    }

    #[test]
    fn scene_bounds_cover_every_object() {
        let scene = Scene::default_scene();
        let bounds = scene.bounding_box();
        // The ground sphere dominates: radius 100 at (0, -100.5, -1).
        assert!(bounds.0[0].contains(-100.0) && bounds.0[0].contains(100.0));
        assert!(bounds.0[1].contains(-200.5) && bounds.0[1].contains(0.5));
        for object in &scene.objects {
            let bx = object.bounding_box();
            for axis in 0..3 {
                assert!(bounds.0[axis].contains(bx.0[axis].min));
                assert!(bounds.0[axis].contains(bx.0[axis].max));
            }
        }
        // An empty scene has empty bounds.
        assert_eq!(Scene::new().bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn rich_scene_is_reproducible_per_seed() {
        let count = |seed: u64| {
            let mut rng = Rand::seeded(seed);
            Scene::rich_scene(&mut rng).objects.len()
        };
        assert_eq!(count(7), count(7));
        // Ground + heroes always present; the grid loses at most a few
        // spheres to the clearance filter around (4, 0.2, 0).
        let total = count(7);
        assert!((479..=488).contains(&total), "unexpected object count {total}");
    }
}
