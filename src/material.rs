use rand::prelude::*;

use crate::object::HitRecord;
use crate::ray::Ray;
use crate::vec3::{reflect, refract, Vec3};

/// Material options for a rendered object.
///
/// The material vocabulary is closed, so this is a tagged enum; every sphere
/// holds a shared handle to one of these.
#[derive(Clone, Debug)]
pub enum Material {
    /// An opaque material with a matte surface, where lighting is calculated
    /// using [Lambertian reflectance][lambert].
    ///
    /// [lambert]: https://en.wikipedia.org/wiki/Lambertian_reflectance
    Lambertian {
        /// The amount of light energy reflected in each color component.
        albedo: Vec3,
    },
    /// A reflective material that looks like polished or frosted metal.
    Metal {
        /// The amount of light energy reflected in each color component, so
        /// `Vec3(1., 1., 1.)` is a white surface, and `Vec3(0., 0., 0.)` is
        /// totally black.
        albedo: Vec3,
        /// The amount of randomness introduced into reflected rays. A `fuzz`
        /// of 0 makes the surface look polished and mirror-smooth, while a
        /// `fuzz` of 1 produces a frosted, almost matte surface. Held to
        /// [0, 1] by `Material::metal`.
        fuzz: f32,
    },
    /// A transparent refractive material like glass or water.
    Dielectric {
        /// [Refractive index][ref-idx] of the material, which determines how
        /// much light is bent when traveling into or out of an object.
        ///
        /// [ref-idx]: https://en.wikipedia.org/wiki/Refractive_index
        ref_idx: f32,
    },
}

impl Material {
    pub fn lambertian(albedo: Vec3) -> Self {
        Material::Lambertian { albedo }
    }

    /// Makes a metal, clamping `fuzz` into [0, 1].
    pub fn metal(albedo: Vec3, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.).min(1.),
        }
    }

    pub fn dielectric(ref_idx: f32) -> Self {
        Material::Dielectric { ref_idx }
    }

    /// Performs surface scattering from a material.
    ///
    /// When light traveling along `ray` reaches a surface made out of this
    /// material (intersection described by `hit`), some of it will be
    /// absorbed, and the rest will either be reflected or refracted. If 100%
    /// of the light is absorbed, `scatter` returns `None`; otherwise, it
    /// returns a new `Ray` giving the reflected/refracted direction of the
    /// light, and a `Vec3` with the amount of energy carried onward in each
    /// of red, green, and blue.
    ///
    /// (In reality, light would be *both* reflected and refracted at a glass
    /// surface, but we choose one or the other randomly and rely on
    /// over-sampling to produce a blend.)
    pub fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut impl Rng) -> Option<(Ray, Vec3)> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = hit.normal + Vec3::in_unit_sphere(rng);
                // The sphere sample can nearly cancel the normal; fall back
                // to the normal rather than hand a degenerate direction to
                // the intersection code.
                if direction.length_squared() < 1e-12 {
                    direction = hit.normal;
                }
                let scattered = Ray {
                    origin: hit.p,
                    direction,
                    time: ray.time,
                };
                Some((scattered, *albedo))
            }
            Material::Metal { albedo, fuzz } => {
                let scattered = Ray {
                    origin: hit.p,
                    direction: reflect(ray.direction.into_unit(), hit.normal)
                        + *fuzz * Vec3::in_unit_sphere(rng),
                    time: ray.time,
                };
                if scattered.direction.dot(hit.normal) > 0. {
                    Some((scattered, *albedo))
                } else {
                    // Fuzz pushed the reflection below the surface; count
                    // the ray as absorbed. Book-standard behavior, kept
                    // as-is.
                    None
                }
            }
            Material::Dielectric { ref_idx } => {
                let ni_over_nt = if hit.front_face {
                    1. / *ref_idx
                } else {
                    *ref_idx
                };
                let unit_direction = ray.direction.into_unit();
                let cos_theta = (-unit_direction).dot(hit.normal).min(1.);

                // Refract unless we are past the critical angle or Schlick's
                // coin-flip picks reflection.
                let direction = refract(unit_direction, hit.normal, ni_over_nt)
                    .filter(|_| rng.gen::<f32>() >= schlick(cos_theta, ni_over_nt))
                    .unwrap_or_else(|| reflect(unit_direction, hit.normal));

                let scattered = Ray {
                    origin: hit.p,
                    direction,
                    time: ray.time,
                };
                // Clear glass absorbs nothing.
                Some((scattered, Vec3::from(1.)))
            }
        }
    }
}

/// [Schlick's approximation][schlick] for the probability of reflection
/// rather than refraction at a dielectric surface.
///
/// [schlick]: https://en.wikipedia.org/wiki/Schlick%27s_approximation
#[inline]
fn schlick(cos: f32, ref_idx: f32) -> f32 {
    let r0 = (1. - ref_idx) / (1. + ref_idx);
    let r0 = r0 * r0;
    r0 + (1. - r0) * f32::powf(1. - cos, 5.)
}
