//! A stochastic ray tracer for scenes made of spheres.
//!
//! The pipeline is the classic one: a [`camera::Camera`] turns jittered image
//! coordinates into rays, [`ray_color`] walks each ray through the [`World`]
//! bouncing off [`material::Material`]s until the bounce budget runs out or
//! the ray escapes to the sky, and [`cast`]/[`par_cast`] average many such
//! estimates per pixel into an [`Image`].

#![deny(unsafe_code)]

pub mod camera;
pub mod material;
pub mod object;
pub mod ppm;
pub mod ray;
pub mod scene;
pub mod vec3;

use std::ops::Range;

use rand::prelude::*;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::object::{HitRecord, Object};
use crate::ray::Ray;
use crate::vec3::{Axis::*, Vec3};

/// Distance below which an intersection is treated as the ray re-hitting the
/// surface it just left ("shadow acne") and discarded.
const T_NEAR: f32 = 0.001;

/// The scene aggregate: an unordered collection of objects that rays can be
/// tested against as a whole.
///
/// Membership only ever grows, and only between renders; during a render the
/// world is read-only and freely shared across threads.
#[derive(Debug, Default, Clone)]
pub struct World {
    objects: Vec<Object>,
}

impl World {
    pub fn new() -> Self {
        World::default()
    }

    /// Appends an object. O(1).
    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Finds the nearest intersection of `ray` with any member inside
    /// `t_range`, by linear scan. Each accepted hit shrinks the upper end of
    /// the window, so later candidates are only accepted if strictly nearer;
    /// on exact ties the earliest-added object wins.
    pub fn hit<'w>(&'w self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'w>> {
        let mut nearest = t_range.end;
        let mut hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, t_range.start..nearest) {
                nearest = rec.t;
                hit = Some(rec);
            }
        }

        hit
    }
}

/// The background: a vertical white-to-blue gradient keyed on the ray
/// direction's vertical component.
fn sky_color(ray: &Ray) -> Vec3 {
    let unit_direction = ray.direction.into_unit();
    let t = 0.5 * (unit_direction[Y] + 1.);
    (1. - t) * Vec3::from(1.) + t * Vec3(0.5, 0.7, 1.0)
}

/// Estimates the color arriving along `ray` with a bounce budget of `depth`.
///
/// This is the actual ray-tracing routine: follow the ray to the nearest
/// surface, ask its material for a scattered continuation, multiply in the
/// attenuation, repeat. The walk ends three ways:
///
/// 1. The ray escapes into the sky, which contributes the gradient color.
/// 2. A material absorbs the ray (fuzzy metal at a grazing angle) — black.
/// 3. The budget runs out — black, a variance-control cutoff rather than
///    anything physical.
pub fn ray_color(world: &World, mut ray: Ray, depth: usize, rng: &mut impl Rng) -> Vec3 {
    // Cumulative (product) attenuation of every surface visited so far.
    let mut strength = Vec3::from(1.);

    for _ in 0..depth {
        match world.hit(&ray, T_NEAR..f32::MAX) {
            Some(hit) => match hit.material.scatter(&ray, &hit, rng) {
                Some((scattered, attenuation)) => {
                    strength = strength * attenuation;
                    ray = scattered;
                }
                None => return Vec3::default(),
            },
            None => return strength * sky_color(&ray),
        }
    }

    Vec3::default()
}

/// Render parameters, passed explicitly rather than living in globals so a
/// render is a pure function of (config, camera, world).
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Independent radiance estimates averaged per pixel.
    pub samples_per_pixel: usize,
    /// Bounce budget handed to `ray_color`.
    pub max_depth: usize,
}

impl RenderConfig {
    /// Cheap settings for interactive preview renders.
    pub fn preview() -> Self {
        RenderConfig {
            width: 250,
            height: 140,
            samples_per_pixel: 1,
            max_depth: 2,
        }
    }

    /// Settings for a final still.
    pub fn quality() -> Self {
        RenderConfig {
            width: 800,
            height: 450,
            samples_per_pixel: 50,
            max_depth: 50,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// A rendered image: scanlines of linear-space colors, top row first.
pub struct Image(Vec<Vec<Vec3>>);

impl Image {
    pub fn width(&self) -> usize {
        self.0.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    /// Scanlines from the top of the image down.
    pub fn scanlines(&self) -> impl Iterator<Item = &[Vec3]> {
        self.0.iter().map(Vec::as_slice)
    }

    fn par_compute(nx: usize, ny: usize, f: impl Fn(usize, usize) -> Vec3 + Sync) -> Image {
        Image(
            (0..ny)
                .into_par_iter()
                .rev()
                .map(|y| (0..nx).map(|x| f(x, y)).collect())
                .collect(),
        )
    }

    fn compute(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> Vec3) -> Image {
        Image(
            (0..ny)
                .rev()
                .map(|y| (0..nx).map(|x| f(x, y)).collect())
                .collect(),
        )
    }
}

/// Averages `samples_per_pixel` jittered estimates for pixel `(x, y)`.
///
/// NaN channels (possible from degenerate geometry) are zeroed here, before
/// the average, so one bad sample costs at most its own contribution.
fn pixel_color(
    config: &RenderConfig,
    camera: &Camera,
    world: &World,
    x: usize,
    y: usize,
    rng: &mut impl Rng,
) -> Vec3 {
    let col: Vec3 = (0..config.samples_per_pixel)
        .map(|_| {
            let s = (x as f32 + rng.gen::<f32>()) / (config.width - 1) as f32;
            let t = (y as f32 + rng.gen::<f32>()) / (config.height - 1) as f32;
            let ray = camera.get_ray(s, t, rng);
            ray_color(world, ray, config.max_depth, rng)
        })
        .map(|c| c.map(|ch| if ch.is_nan() { 0. } else { ch }))
        .sum();
    col / config.samples_per_pixel as f32
}

/// Renders the scene in parallel, one rayon task per scanline.
pub fn par_cast(config: &RenderConfig, camera: &Camera, world: &World) -> Image {
    Image::par_compute(config.width, config.height, |x, y| {
        let mut rng = rand::thread_rng();
        pixel_color(config, camera, world, x, y, &mut rng)
    })
}

/// Renders the scene on the calling thread with the caller's RNG; the
/// reference path, and the one to use for reproducible output.
pub fn cast(config: &RenderConfig, camera: &Camera, world: &World, rng: &mut impl Rng) -> Image {
    Image::compute(config.width, config.height, |x, y| {
        pixel_color(config, camera, world, x, y, rng)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::object::Sphere;
    use std::sync::Arc;

    fn up_ray() -> Ray {
        Ray {
            origin: Vec3::default(),
            direction: Vec3(0., 1., 0.),
            time: 0.,
        }
    }

    fn down_ray() -> Ray {
        Ray {
            origin: Vec3::default(),
            direction: Vec3(0., -1., 0.),
            time: 0.,
        }
    }

    fn one_sphere_world(material: Material) -> World {
        let mut world = World::new();
        world.add(Sphere::new(Vec3(0., 2., 0.), 1., Arc::new(material)));
        world
    }

    #[test]
    fn depth_zero_is_black() {
        let world = one_sphere_world(Material::lambertian(Vec3::from(0.9)));
        let mut rng = SmallRng::seed_from_u64(20);
        assert_eq!(ray_color(&world, up_ray(), 0, &mut rng), Vec3::default());
    }

    #[test]
    fn empty_world_returns_sky_gradient() {
        let world = World::new();
        let mut rng = SmallRng::seed_from_u64(21);
        // Straight up: t = 1, the blue endpoint.
        let up = ray_color(&world, up_ray(), 50, &mut rng);
        assert!((up - Vec3(0.5, 0.7, 1.0)).length() < 1e-6);
        // Straight down: t = 0, pure white.
        let down = ray_color(&world, down_ray(), 50, &mut rng);
        assert!((down - Vec3::from(1.)).length() < 1e-6);
    }

    #[test]
    fn nearest_object_wins() {
        let gray = Arc::new(Material::lambertian(Vec3::from(0.5)));
        let mut world = World::new();
        world.add(Sphere::new(Vec3(0., 5., 0.), 1., gray.clone()));
        world.add(Sphere::new(Vec3(0., 2., 0.), 1., gray));
        let hit = world.hit(&up_ray(), 0.001..f32::MAX).unwrap();
        assert!((hit.t - 1.).abs() < 1e-5);
        // Add order does not change the result.
        let gray = Arc::new(Material::lambertian(Vec3::from(0.5)));
        let mut world = World::new();
        world.add(Sphere::new(Vec3(0., 2., 0.), 1., gray.clone()));
        world.add(Sphere::new(Vec3(0., 5., 0.), 1., gray));
        let hit = world.hit(&up_ray(), 0.001..f32::MAX).unwrap();
        assert!((hit.t - 1.).abs() < 1e-5);
    }

    #[test]
    fn mirror_bounce_reaches_the_sky() {
        // A mirror directly below bounces the ray into the sky, so the
        // result is attenuated sky; the estimator must not go black.
        let mut rng = SmallRng::seed_from_u64(22);
        let world = one_sphere_world(Material::metal(Vec3::from(0.5), 0.));
        let color = ray_color(&world, up_ray(), 50, &mut rng);
        assert!(color.length_squared() > 0.);
    }

    fn demo_scene() -> (World, Camera) {
        let mut world = World::new();
        world.add(Sphere::new(
            Vec3(0., -100.5, -1.),
            100.,
            Arc::new(Material::lambertian(Vec3(0.8, 0.8, 0.))),
        ));
        world.add(Sphere::new(
            Vec3(0., 0., -1.),
            0.5,
            Arc::new(Material::lambertian(Vec3(0.1, 0.2, 0.5))),
        ));
        world.add(Sphere::new(
            Vec3(1., 0., -1.),
            0.5,
            Arc::new(Material::metal(Vec3(0.8, 0.6, 0.2), 0.3)),
        ));
        let camera = Camera::look(
            Vec3(0., 0., 1.),
            Vec3(0., 0., -1.),
            Vec3(0., 1., 0.),
            60.,
            1.,
            0.,
            2.,
        );
        (world, camera)
    }

    #[test]
    fn sampling_error_shrinks_with_sample_count() {
        // Standard error of the per-batch mean should fall roughly as
        // 1/sqrt(n); with n 64x larger, expect close to an 8x drop, and
        // assert at least 3x to stay robust to noise.
        let (world, camera) = demo_scene();
        let mut rng = SmallRng::seed_from_u64(23);

        let mut batch_std = |samples: usize| {
            let config = RenderConfig {
                width: 3,
                height: 3,
                samples_per_pixel: samples,
                max_depth: 10,
            };
            let means: Vec<f32> = (0..24)
                .map(|_| {
                    pixel_color(&config, &camera, &world, 1, 1, &mut rng)
                        .reduce(std::ops::Add::add)
                        / 3.
                })
                .collect();
            let mean = means.iter().sum::<f32>() / means.len() as f32;
            let var = means.iter().map(|m| (m - mean) * (m - mean)).sum::<f32>()
                / (means.len() - 1) as f32;
            var.sqrt()
        };

        let coarse = batch_std(1);
        let fine = batch_std(64);
        assert!(
            fine < coarse / 3.,
            "std {} at 64 spp vs {} at 1 spp",
            fine,
            coarse
        );
    }

    #[test]
    fn repeated_renders_agree_on_average() {
        let (world, camera) = demo_scene();
        let config = RenderConfig {
            width: 8,
            height: 8,
            samples_per_pixel: 128,
            max_depth: 10,
        };
        let mut rng_a = SmallRng::seed_from_u64(24);
        let mut rng_b = SmallRng::seed_from_u64(25);
        let a = cast(&config, &camera, &world, &mut rng_a);
        let b = cast(&config, &camera, &world, &mut rng_b);

        let diff: f32 = a
            .scanlines()
            .flatten()
            .zip(b.scanlines().flatten())
            .map(|(pa, pb)| (*pa - *pb).map(f32::abs).reduce(std::ops::Add::add) / 3.)
            .sum::<f32>()
            / (config.width * config.height) as f32;
        assert!(diff < 0.05, "mean pixel difference {}", diff);
    }
}
