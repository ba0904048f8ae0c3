use criterion::{criterion_group, Criterion};
use rand::prelude::*;

use spherecast::camera::Camera;
use spherecast::scene::random_scene;
use spherecast::vec3::Vec3;
use spherecast::{cast, RenderConfig};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("scene/10x10x4", |b| {
        let config = RenderConfig {
            width: 10,
            height: 10,
            samples_per_pixel: 4,
            max_depth: 50,
        };

        let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
        let world = random_scene(&mut rng);

        let camera = Camera::look(
            Vec3(13., 2., 3.),
            Vec3(0., 0., 0.),
            Vec3(0., 1., 0.),
            20.,
            config.aspect(),
            0.1,
            10.,
        );

        b.iter(|| cast(&config, &camera, &world, &mut rng));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
