use rand::prelude::*;

use crate::ray::Ray;
use crate::vec3::{Axis::*, Point3, Vec3};

/// A thin-lens camera.
///
/// Rays for the same `(s, t)` but different lens samples all pass through the
/// same point on the focal plane, so geometry away from that plane blurs.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Positions a camera at `look_from`, aimed at `look_at`, with `up` giving
    /// the roll. `fov` is the vertical field of view in degrees, and
    /// `aspect` is width over height.
    ///
    /// `look_from` must differ from `look_at`, and `up` must not be parallel
    /// to the view direction.
    pub fn look(
        look_from: Point3,
        look_at: Point3,
        up: Vec3,
        fov: f64,
        aspect: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let lens_radius = aperture / 2.;
        let theta = fov.to_radians();
        let half_height = f64::tan(theta / 2.);
        let half_width = aspect * half_height;
        let origin = look_from;
        let w = (look_from - look_at).into_unit();
        let u = up.cross(&w).into_unit();
        let v = w.cross(&u);
        let lower_left_corner =
            origin - half_width * focus_dist * u - half_height * focus_dist * v - focus_dist * w;
        let horizontal = 2. * half_width * focus_dist * u;
        let vertical = 2. * half_height * focus_dist * v;
        log::trace!(
            "camera at {:?} facing {:?}, lens radius {}",
            origin,
            -w,
            lens_radius
        );
        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius,
        }
    }

    /// Generates a primary ray through normalized image-plane coordinates
    /// `(s, t)`, where `(0, 0)` is the lower left corner.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut impl Rng) -> Ray {
        let rd = self.lens_radius * Vec3::in_unit_disc(rng);
        let offset = rd[X] * self.u + rd[Y] * self.v;
        Ray {
            origin: self.origin + offset,
            direction: self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        }
    }
}
