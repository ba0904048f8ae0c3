use rand::prelude::*;

use crate::ray::Ray;
use crate::vec3::{Axis::*, Vec3};

/// A thin-lens camera.
///
/// Holds both its configuration (look-from/look-at, field of view, lens) and
/// the viewport geometry derived from it. Reconfiguration — `retarget`,
/// `move_along`, `rotate_about` — mutates the camera in place and re-derives
/// the basis and viewport, so callers keep a single camera across renders.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    look_at: Vec3,
    up: Vec3,
    fov: f32,
    aspect: f32,
    focus_dist: f32,
    lens_radius: f32,
    time0: f32,
    time1: f32,

    // Derived by `refresh`.
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Builds a camera at `look_from` aimed at `look_at`. `fov` is the
    /// vertical field of view in degrees, `aperture` the lens diameter. The
    /// shutter interval defaults to the zero-width `[0, 0]`; see
    /// `with_exposure`.
    pub fn look(
        look_from: Vec3,
        look_at: Vec3,
        up: Vec3,
        fov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let mut camera = Camera {
            origin: look_from,
            look_at,
            up,
            fov,
            aspect,
            focus_dist,
            lens_radius: aperture / 2.,
            time0: 0.,
            time1: 0.,
            lower_left_corner: Vec3::default(),
            horizontal: Vec3::default(),
            vertical: Vec3::default(),
            u: Vec3::default(),
            v: Vec3::default(),
            w: Vec3::default(),
        };
        camera.refresh();
        camera
    }

    /// Sets the shutter interval for motion blur; ray times are drawn
    /// uniformly from it.
    pub fn with_exposure(mut self, open: f32, close: f32) -> Self {
        self.time0 = open;
        self.time1 = close;
        self
    }

    /// Re-derives the orthonormal basis and viewport from the current
    /// configuration. Idempotent.
    fn refresh(&mut self) {
        let theta = self.fov * std::f32::consts::PI / 180.;
        let half_height = f32::tan(theta / 2.);
        let half_width = self.aspect * half_height;

        self.w = (self.origin - self.look_at).into_unit();
        self.u = self.up.cross(&self.w).into_unit();
        self.v = self.w.cross(&self.u);

        self.horizontal = 2. * half_width * self.focus_dist * self.u;
        self.vertical = 2. * half_height * self.focus_dist * self.v;
        self.lower_left_corner = self.origin
            - self.horizontal / 2.
            - self.vertical / 2.
            - self.focus_dist * self.w;
    }

    /// Moves the viewpoint and/or aim target, keeping every other setting.
    pub fn retarget(&mut self, look_from: Vec3, look_at: Vec3) {
        self.origin = look_from;
        self.look_at = look_at;
        self.refresh();
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Generates a ray through the viewport position `(s, t)`, both in
    /// [0, 1], from a random point on the lens, stamped with a time drawn
    /// from the shutter interval.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut impl Rng) -> Ray {
        let rd = self.lens_radius * Vec3::in_unit_disc(rng);
        let offset = rd[X] * self.u + rd[Y] * self.v;
        let time = if self.time0 < self.time1 {
            rng.gen_range(self.time0, self.time1)
        } else {
            self.time0
        };
        Ray {
            origin: self.origin + offset,
            direction: self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
            time,
        }
    }

    /// Translates the camera (both viewpoint and aim target) by `magnitude`
    /// along a camera-relative principal axis: `(0,0,±1)` is forward/back
    /// along the aim direction, `(±1,0,0)` strafes, `(0,±1,0)` moves along
    /// the world vertical. Any other axis is logged and ignored.
    pub fn move_along(&mut self, axis: Vec3, magnitude: f32) {
        let forward = (self.look_at - self.origin).into_unit();
        // Forward rotated a quarter turn about the world vertical.
        let right = Vec3(-forward.2, 0., forward.0);
        let step = if axis == Vec3(0., 0., 1.) {
            forward
        } else if axis == Vec3(0., 0., -1.) {
            -forward
        } else if axis == Vec3(1., 0., 0.) {
            right
        } else if axis == Vec3(-1., 0., 0.) {
            -right
        } else if axis == Vec3(0., 1., 0.) || axis == Vec3(0., -1., 0.) {
            axis
        } else {
            log::warn!("ignoring camera move along unrecognized axis {:?}", axis);
            return;
        };
        self.origin = self.origin + magnitude * step;
        self.look_at = self.look_at + magnitude * step;
        self.refresh();
    }

    /// Orbits the aim target around the viewpoint by `degrees` about a
    /// principal axis. Any other axis is logged and ignored.
    pub fn rotate_about(&mut self, axis: Vec3, degrees: f32) {
        let radians = degrees * std::f32::consts::PI / 180.;
        let (sin, cos) = radians.sin_cos();
        let rel = self.look_at - self.origin;
        let rotated = if axis == Vec3(1., 0., 0.) {
            Vec3(rel.0, rel.1 * cos - rel.2 * sin, rel.1 * sin + rel.2 * cos)
        } else if axis == Vec3(0., 1., 0.) {
            Vec3(rel.0 * cos + rel.2 * sin, rel.1, -rel.0 * sin + rel.2 * cos)
        } else if axis == Vec3(0., 0., 1.) {
            Vec3(rel.0 * cos - rel.1 * sin, rel.0 * sin + rel.1 * cos, rel.2)
        } else {
            log::warn!("ignoring camera rotation about unrecognized axis {:?}", axis);
            return;
        };
        self.look_at = self.origin + rotated;
        self.refresh();
    }
}
