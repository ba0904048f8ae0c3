use std::ops::Range;
use std::sync::Arc;

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// A sphere, the one surface this engine knows how to intersect.
///
/// The material is reference-counted so that many spheres can share a single
/// material instance (the glass and ground materials in the book-cover scene,
/// for example).
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere. A *negative* radius flips the surface normals
    /// inward, which turns a sphere nested inside another glass sphere into a
    /// hollow shell.
    pub radius: f32,
    /// Material of the sphere.
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }

    /// Tests if `ray` intersects `self` within `t_range` along the ray, and
    /// if so describes the nearest such intersection.
    ///
    /// Substituting the ray equation into `|P - center|^2 = radius^2` gives a
    /// quadratic in `t`; of its up-to-two real roots we prefer the near one,
    /// falling back to the far one when the near root lies outside `t_range`.
    /// Both ends of the window are exclusive: the lower end is the caller's
    /// self-intersection epsilon, the upper end shrinks as nearer objects are
    /// found.
    #[inline]
    pub fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'o>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0. {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut t = (-half_b - sqrtd) / a;
        if t <= t_range.start || t >= t_range.end {
            t = (-half_b + sqrtd) / a;
            if t <= t_range.start || t >= t_range.end {
                return None;
            }
        }

        let p = ray.at(t);
        // Dividing by a negative radius inverts the normal, giving the
        // hollow-sphere effect for free.
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(ray, t, p, outward_normal, &self.material))
    }
}

/// An object in a scene.
///
/// The engine's surface vocabulary is closed, so objects are a tagged enum
/// rather than trait objects; `Sphere` is currently the only variant.
#[derive(Debug, Clone)]
pub enum Object {
    Sphere(Sphere),
}

impl Object {
    /// Dispatches the intersection test to the concrete surface.
    #[inline]
    pub fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'o>> {
        match self {
            Object::Sphere(s) => s.hit(ray, t_range),
        }
    }
}

impl From<Sphere> for Object {
    fn from(s: Sphere) -> Self {
        Object::Sphere(s)
    }
}

/// A description of a `Ray` hitting an `Object`. This stores the information
/// needed to scatter off the surface.
///
/// The `'m` lifetime refers to the `Material` of the `Object`, which we
/// capture by reference. Thus, a `HitRecord` cannot outlive the `Object` it
/// refers to.
#[derive(Clone)]
pub struct HitRecord<'m> {
    /// Position along the ray, expressed in distance from the origin.
    pub t: f32,
    /// Position along the ray, as an actual point.
    pub p: Vec3,
    /// Surface normal at the hit position, unit length, always facing
    /// *against* the incoming ray.
    pub normal: Vec3,
    /// Whether the ray arrived from outside the surface (`true`) or from
    /// within it (`false`). Dielectrics use this to pick the refraction
    /// index ratio.
    pub front_face: bool,
    /// Material of the object at the hit position.
    pub material: &'m Material,
}

impl<'m> HitRecord<'m> {
    /// Builds a record from an *outward* surface normal, flipping it if the
    /// ray hit the surface from the inside so the stored normal always
    /// opposes the ray.
    pub fn new(ray: &Ray, t: f32, p: Vec3, outward_normal: Vec3, material: &'m Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.;
        HitRecord {
            t,
            p,
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            front_face,
            material,
        }
    }
}
