use rand::prelude::*;

use crate::object::HitRecord;
use crate::ray::Ray;
use crate::vec3::{reflect, refract, Color, Vec3};

/// Material options for a rendered object.
///
/// Materials are immutable once built, and are shared between objects (and
/// threads) behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// An opaque material with a matte surface, where lighting is calculated
    /// using [Lambertian reflectance][lambert].
    ///
    /// [lambert]: https://en.wikipedia.org/wiki/Lambertian_reflectance
    Lambertian { albedo: Color },
    /// A reflective material that looks like polished or frosted metal.
    Metal {
        /// The amount of light energy reflected in each color component, so
        /// `Vec3(1., 1., 1.)` is a white surface, and `Vec3(0., 0., 0.)` is
        /// totally black.
        albedo: Color,
        /// The amount of randomness introduced into reflected rays. A `fuzz` of
        /// 0 makes the surface look polished and mirror-smooth, while a `fuzz`
        /// of 1 produces a frosted, almost matte surface.
        fuzz: f64,
    },
    /// A transparent refractive material like glass or water.
    Dielectric {
        /// [Refractive index][ref-idx] of the material, which determines how
        /// much light is bent when traveling into or out of an object.
        ///
        /// [ref-idx]: https://en.wikipedia.org/wiki/Refractive_index
        ref_idx: f64,
    },
}

impl Material {
    /// Makes a `Metal`, clamping `fuzz` to at most 1.
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.min(1.),
        }
    }

    /// Performs surface scattering from a material.
    ///
    /// When light traveling along `ray` reaches a surface made out of this
    /// material (intersection described by `hit`), some of it will be absorbed,
    /// and the rest will either be reflected or refracted. If 100% of the light
    /// is absorbed, `scatter` returns `None`; otherwise, it returns a new `Ray`
    /// giving the reflected/refracted direction of the light, and a `Color` with
    /// the amount of energy reflected/refracted in each of red, green, and
    /// blue.
    ///
    /// (In reality, light would be *both* reflected and refracted, but we
    /// choose one or the other randomly and use over-sampling to produce a
    /// blend.)
    pub fn scatter(&self, ray: &Ray, hit: &HitRecord, rng: &mut impl Rng) -> Option<(Ray, Color)> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = hit.normal + Vec3::random_unit_vector(rng);
                // The random vector can all but cancel the normal.
                if direction.is_near_zero() {
                    direction = hit.normal;
                }
                let scattered = Ray {
                    origin: hit.p,
                    direction,
                };
                Some((scattered, *albedo))
            }
            Material::Metal { albedo, fuzz } => {
                let scattered = Ray {
                    origin: hit.p,
                    direction: reflect(ray.direction.into_unit(), hit.normal)
                        + *fuzz * Vec3::in_unit_sphere(rng),
                };
                if scattered.direction.dot(hit.normal) > 0. {
                    Some((scattered, *albedo))
                } else {
                    // Fuzzed below the surface.
                    None
                }
            }
            Material::Dielectric { ref_idx } => {
                let ratio = if hit.front_face {
                    1. / *ref_idx
                } else {
                    *ref_idx
                };

                let unit_direction = ray.direction.into_unit();
                let cos_theta = f64::min((-unit_direction).dot(hit.normal), 1.);

                let direction = if cannot_refract(cos_theta, ratio)
                    || schlick(cos_theta, *ref_idx) > rng.gen::<f64>()
                {
                    reflect(unit_direction, hit.normal)
                } else {
                    refract(unit_direction, hit.normal, ratio)
                };

                let scattered = Ray {
                    origin: hit.p,
                    direction,
                };
                Some((scattered, Vec3::from(1.)))
            }
        }
    }
}

/// Checks for total internal reflection: Snell's law has no solution when
/// `ratio * sin(theta) > 1`.
#[inline]
fn cannot_refract(cos_theta: f64, ratio: f64) -> bool {
    let sin_theta = (1. - cos_theta * cos_theta).sqrt();
    ratio * sin_theta > 1.
}

/// [Schlick's approximation][schlick] for computing reflection vs. refraction
/// at a material surface.
///
/// `r0` depends only on `(n - 1) / (n + 1)` squared, which is the same for an
/// index and its reciprocal, so this works on either side of the surface.
///
/// [schlick]: https://en.wikipedia.org/wiki/Schlick%27s_approximation
#[inline]
fn schlick(cos: f64, ref_idx: f64) -> f64 {
    let r0 = (1. - ref_idx) / (1. + ref_idx);
    let r0 = r0 * r0;
    r0 + (1. - r0) * f64::powi(1. - cos, 5)
}
