use crate::vec3::Vec3;

/// A ray, beginning at `origin` and extending along `direction`, sampled at
/// shutter instant `time`.
///
/// `direction` need not be unit length. `time` only matters for motion blur;
/// with a zero-width shutter interval it is always 0.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Finds the point along the ray at distance `t` from the origin.
    /// Positive values of `t` represent positions forward from the origin,
    /// and negative values, behind it. No bounds checking; intersection
    /// routines restrict `t` to an epsilon-bounded window themselves.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray {
            origin: Vec3(1., 2., 3.),
            direction: Vec3(0., 0., 2.),
            time: 0.,
        };
        assert_eq!(r.at(0.), Vec3(1., 2., 3.));
        assert_eq!(r.at(1.5), Vec3(1., 2., 6.));
        assert_eq!(r.at(-1.), Vec3(1., 2., 1.));
    }
}
