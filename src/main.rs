use std::io::{self, Write};

use rand::prelude::*;

use spherecast::camera::Camera;
use spherecast::ppm::write_ppm;
use spherecast::scene::random_scene;
use spherecast::vec3::Vec3;
use spherecast::{par_cast, RenderConfig};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = RenderConfig::quality();

    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    let world = random_scene(&mut rng);
    log::info!("scene populated with {} spheres", world.len());

    let camera = Camera::look(
        Vec3(13., 2., 3.),
        Vec3(0., 0., 0.),
        Vec3(0., 1., 0.),
        20.,
        config.aspect(),
        0.1,
        10.,
    );

    log::info!(
        "rendering {}x{} at {} samples/pixel, depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let image = par_cast(&config, &camera, &world);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_ppm(&mut out, &image)?;
    out.flush()
}
