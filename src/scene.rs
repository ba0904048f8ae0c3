//! Ready-made scenes and incremental scene-population helpers.
//!
//! Everything here just calls `World::add` in a loop; the engine proper
//! makes no assumptions about how a world was populated.

use std::sync::Arc;

use rand::prelude::*;

use crate::material::Material;
use crate::object::Sphere;
use crate::vec3::Vec3;
use crate::World;

/// The book-cover scene: a big matte ground sphere, a 22x22 jittered grid of
/// small diffuse/metal/glass spheres, and three hero spheres. The glass
/// material is built once and shared by every glass sphere.
pub fn random_scene(rng: &mut impl Rng) -> World {
    let mut world = World::new();

    world.add(Sphere::new(
        Vec3(0., -1000., 0.),
        1000.,
        Arc::new(Material::lambertian(Vec3::from(0.5))),
    ));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - Vec3(4., 0.2, 0.)).length() <= 0.9 {
                continue;
            }

            let choose_mat = rng.gen::<f32>();
            let material = if choose_mat < 0.8 {
                Arc::new(Material::lambertian(
                    rng.gen::<Vec3>() * rng.gen::<Vec3>(),
                ))
            } else if choose_mat < 0.95 {
                Arc::new(Material::metal(
                    Vec3::random_in_range(rng, 0.5..1.),
                    rng.gen_range(0., 0.5),
                ))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3(0., 1., 0.), 1., glass));
    world.add(Sphere::new(
        Vec3(-4., 1., 0.),
        1.,
        Arc::new(Material::lambertian(Vec3(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3(4., 1., 0.),
        1.,
        Arc::new(Material::metal(Vec3(0.7, 0.6, 0.5), 0.)),
    ));

    world
}

/// A small fixed layout for quick renders: the ground sphere and two fuzzy
/// metal spheres with randomized albedo.
pub fn test_scene(rng: &mut impl Rng) -> World {
    let mut world = World::new();

    world.add(Sphere::new(
        Vec3(0., -1000., 0.),
        1000.,
        Arc::new(Material::lambertian(Vec3::from(0.5))),
    ));

    let fuzz = rng.gen_range(0., 0.1);
    world.add(Sphere::new(
        Vec3(5., 0.4, 2.),
        0.4,
        Arc::new(Material::metal(Vec3::random_in_range(rng, 0.6..1.), fuzz)),
    ));
    world.add(Sphere::new(
        Vec3(3., 0.2, 1.),
        0.2,
        Arc::new(Material::metal(Vec3::random_in_range(rng, 0.3..0.6), fuzz)),
    ));

    world
}

/// Drops a hollow glass sphere at `center`: an outer shell and an inner
/// sphere of negative radius sharing one material, so the inner surface's
/// normals point inward.
pub fn add_hollow_glass_sphere(world: &mut World, center: Vec3, radius: f32) {
    let glass = Arc::new(Material::dielectric(1.5));
    world.add(Sphere::new(center, radius, glass.clone()));
    world.add(Sphere::new(center, -0.9 * radius, glass));
}

/// Appends one metal sphere of the standard insertion radius.
pub fn add_metal_sphere(world: &mut World, center: Vec3, albedo: Vec3, fuzz: f32) {
    world.add(Sphere::new(
        center,
        0.3,
        Arc::new(Material::metal(albedo, fuzz)),
    ));
}

/// Appends a metal sphere with randomized placement and finish, for
/// interactive scene-building.
pub fn add_random_sphere(world: &mut World, rng: &mut impl Rng) {
    let center = Vec3(
        rng.gen_range(-3., 3.),
        rng.gen_range(0., 3.),
        rng.gen_range(-3., 3.),
    );
    add_metal_sphere(
        world,
        center,
        Vec3::random_in_range(rng, 0.6..1.),
        rng.gen_range(0., 0.5),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::Ray;

    #[test]
    fn random_scene_has_ground_grid_and_heroes() {
        let mut rng = SmallRng::seed_from_u64(30);
        let world = random_scene(&mut rng);
        // Ground + three heroes + most of the 484 grid slots (a few are
        // culled near the metal hero).
        assert!(world.len() > 400);
    }

    #[test]
    fn incremental_insertion_grows_the_world() {
        let mut rng = SmallRng::seed_from_u64(31);
        let mut world = test_scene(&mut rng);
        let before = world.len();
        add_random_sphere(&mut world, &mut rng);
        add_metal_sphere(&mut world, Vec3(0., 1., 0.), Vec3::from(0.8), 0.1);
        assert_eq!(world.len(), before + 2);
    }

    #[test]
    fn hollow_glass_shell_shares_one_material() {
        let mut world = World::new();
        add_hollow_glass_sphere(&mut world, Vec3(0., 1., 0.), 0.5);
        assert_eq!(world.len(), 2);

        // Looking in past the outer shell (its entry sits at t = 4.5), the
        // inner negative-radius shell reports a back face from outside.
        let ray = Ray {
            origin: Vec3(0., 1., 5.),
            direction: Vec3(0., 0., -1.),
            time: 0.,
        };
        let inner = world.hit(&ray, 4.51..f32::MAX).expect("inner shell not hit");
        assert!((inner.t - 4.55).abs() < 1e-4);
        assert!(!inner.front_face);
    }
}
