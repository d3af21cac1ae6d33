
use rand::prelude::*;

/// A three-vector of doubles, used as a color, coordinate, etc.
///
/// The components of the vector can be accessed in three ways:
///
/// 1. Tuple-style: `v.0`, `v.1`, `v.2`.
/// 2. Using the `Axis` enum: `v[X]`, `v[Y]`, `v[Z]`. This requires a `use
///    rtcore::vec3::Axis::*` statement.
/// 3. Using the `Channel` enum: `v[R]`, `v[G]`, `v[B]`. This requires a `use
///    rtcore::vec3::Channel::*` statement.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Vec3(pub f64, pub f64, pub f64);

/// A position in space. Same algebra as `Vec3`, different role.
pub type Point3 = Vec3;

/// A linear RGB color. Not clamped; arithmetic is componentwise.
pub type Color = Vec3;

impl Vec3 {
    /// Generates a random `Vec3` with each component in `[min, max)`.
    pub fn random_range(rng: &mut impl Rng, min: f64, max: f64) -> Self {
        Vec3(
            rng.gen_range(min..max),
            rng.gen_range(min..max),
            rng.gen_range(min..max),
        )
    }

    /// Generates a random `Vec3` inside a sphere with unit radius. The length
    /// of the result is between 0 and 1.
    pub fn in_unit_sphere(rng: &mut impl Rng) -> Self {
        loop {
            let v = 2. * rng.gen::<Vec3>() - Vec3::from(1.);
            if v.length_squared() < 1. {
                return v;
            }
        }
    }

    /// Generates a random unit-length `Vec3` by normalizing a point from
    /// `in_unit_sphere`.
    pub fn random_unit_vector(rng: &mut impl Rng) -> Self {
        loop {
            let v = Vec3::in_unit_sphere(rng);
            // The origin itself has no direction.
            if !v.is_near_zero() {
                return v.into_unit();
            }
        }
    }

    /// Generates a random `Vec3` inside the unit sphere, on the same side of
    /// the surface as `normal`.
    pub fn in_hemisphere(rng: &mut impl Rng, normal: Vec3) -> Self {
        let v = Vec3::in_unit_sphere(rng);
        if v.dot(normal) > 0. {
            v
        } else {
            -v
        }
    }

    /// Generates a random `Vec3` inside a disc with unit radius in the XY
    /// plane. The length of the result is between 0 and 1, and the Z component
    /// is 0.
    pub fn in_unit_disc(rng: &mut impl Rng) -> Self {
        loop {
            let v = 2. * Vec3(rng.gen(), rng.gen(), 0.) - Vec3(1., 1., 0.);
            if v.length_squared() < 1. {
                return v;
            }
        }
    }

    /// Computes the dot product of two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.zip_with(other, core::ops::Mul::mul)
            .reduce(core::ops::Add::add)
    }

    /// Computes the cross product of two vectors.
    pub fn cross(&self, other: &Self) -> Self {
        Vec3(
            self.1 * other.2 - self.2 * other.1,
            -(self.0 * other.2 - self.2 * other.0),
            self.0 * other.1 - self.1 * other.0,
        )
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Gets the length/magnitude of a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Produces a vector collinear with `self` but with unit length. That is,
    /// the result points the same direction as `self` relative to the origin.
    ///
    /// The zero vector has no direction; the result is NaN in that case.
    pub fn into_unit(self) -> Self {
        self / self.length()
    }

    /// Checks whether every component is within `1e-8` of zero.
    pub fn is_near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        self.0.abs() < S && self.1.abs() < S && self.2.abs() < S
    }

    /// Applies `f` to each element of the vector in turn, giving a new vector.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Vec3(f(self.0), f(self.1), f(self.2))
    }

    /// Combines each corresponding element of `self` and `other` by giving them
    /// as arguments to function `f`. The results are collected into a new
    /// vector.
    #[inline]
    pub fn zip_with(self, other: Vec3, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Vec3(f(self.0, other.0), f(self.1, other.1), f(self.2, other.2))
    }

    /// Combines the elements of `self` using `f` until only one result remains.
    #[inline]
    pub fn reduce(self, f: impl Fn(f64, f64) -> f64) -> f64 {
        f(f(self.0, self.1), self.2)
    }
}

/// Broadcasts a single value to all vector lanes.
impl From<f64> for Vec3 {
    #[inline]
    fn from(v: f64) -> Self {
        Vec3(v, v, v)
    }
}

/// Element-wise multiplication (Hadamard product). I have reservations about
/// making this available as `*`, but it sure is convenient...
impl std::ops::Mul for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Mul::mul)
    }
}

/// `scalar * vector`
impl std::ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::from(self) * rhs
    }
}

/// `vector / scalar`
impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self.map(|x| x / rhs)
    }
}

/// `vector + vector`
impl std::ops::Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Add::add)
    }
}

/// `vector - vector`
impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Sub::sub)
    }
}

/// `-vector`
impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Self::Output {
        self.map(std::ops::Neg::neg)
    }
}

/// Allow accumulation of vectors from an iterator.
impl std::iter::Sum for Vec3 {
    #[inline]
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Vec3::default(), std::ops::Add::add)
    }
}

/// Allow `Vec3` to be produced by `Rng::gen`.
///
/// The resulting vector has each component in the half-open range `[0,1)`. Note
/// that this is *not* a unit vector.
impl rand::distributions::Distribution<Vec3> for rand::distributions::Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3(rng.gen(), rng.gen(), rng.gen())
    }
}

/// Names for vector lanes when used as a color.
///
/// `Vec3` has an `Index` impl for `Channel`, so you can use `Channel` values to
/// select components from a `Vec3`:
///
/// ```
/// use rtcore::vec3::{Vec3, Channel::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[R], 1.);
/// assert_eq!(v[G], 2.);
/// assert_eq!(v[B], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
}

use Channel::*;

impl ::std::ops::Index<Channel> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Channel) -> &Self::Output {
        match idx {
            R => &self.0,
            G => &self.1,
            B => &self.2,
        }
    }
}

/// Names for vector lanes when used as a coordinate.
///
/// `Vec3` has an `Index` impl for `Axis`, so you can use `Axis` values to
/// select components from a `Vec3`:
///
/// ```
/// use rtcore::vec3::{Vec3, Axis::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[X], 1.);
/// assert_eq!(v[Y], 2.);
/// assert_eq!(v[Z], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

use Axis::*;

impl ::std::ops::Index<Axis> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Axis) -> &Self::Output {
        match idx {
            X => &self.0,
            Y => &self.1,
            Z => &self.2,
        }
    }
}

/// Reflects a vector `v` around a surface normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2. * v.dot(n) * n
}

/// Refracts the unit vector `uv` through a surface with normal `n`, using
/// Snell's law. `ratio` is the refractive index if the ray is exiting the
/// material, or its reciprocal if it's entering.
///
/// The caller is responsible for ruling out total internal reflection first.
pub fn refract(uv: Vec3, n: Vec3, ratio: f64) -> Vec3 {
    let cos_theta = f64::min((-uv).dot(n), 1.);
    let r_out_perp = ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1. - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xDEADBEEF)
    }

    #[test]
    fn into_unit_has_length_one() {
        let mut rng = rng();
        for _ in 0..10_000 {
            let v = Vec3::random_range(&mut rng, -100., 100.);
            if v.is_near_zero() {
                continue;
            }
            assert!((v.into_unit().length() - 1.).abs() < 1e-9, "{:?}", v);
        }
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vec3(1., 0., 0.);
        let y = Vec3(0., 1., 0.);
        assert_eq!(x.cross(&y), Vec3(0., 0., 1.));
        assert_eq!(y.cross(&x), Vec3(0., 0., -1.));
    }

    #[test]
    fn near_zero_threshold() {
        assert!(Vec3(1e-9, -1e-9, 0.).is_near_zero());
        assert!(!Vec3(1e-9, 1e-7, 0.).is_near_zero());
    }

    #[test]
    fn reflect_flips_normal_component() {
        let v = Vec3(1., -1., 0.);
        assert_eq!(reflect(v, Vec3(0., 1., 0.)), Vec3(1., 1., 0.));
    }

    #[test]
    fn refract_at_normal_incidence_goes_straight_through() {
        let n = Vec3(0., 0., 1.);
        let out = refract(Vec3(0., 0., -1.), n, 1. / 1.5);
        assert!((out - Vec3(0., 0., -1.)).length() < 1e-12);
    }

    #[test]
    fn refract_bends_toward_normal_entering_denser_medium() {
        let n = Vec3(0., 1., 0.);
        let uv = Vec3(1., -1., 0.).into_unit();
        let out = refract(uv, n, 1. / 1.5);
        assert!((out.length() - 1.).abs() < 1e-9);
        let sin_in = uv.0;
        let sin_out = out.0;
        assert!((sin_out - sin_in / 1.5).abs() < 1e-9);
    }

    #[test]
    fn samplers_stay_in_bounds() {
        let mut rng = rng();
        let n = Vec3(0., 1., 0.);
        for _ in 0..1000 {
            assert!(Vec3::in_unit_sphere(&mut rng).length_squared() < 1.);

            let d = Vec3::in_unit_disc(&mut rng);
            assert!(d.length_squared() < 1.);
            assert_eq!(d.2, 0.);

            assert!(Vec3::in_hemisphere(&mut rng, n).dot(n) >= 0.);

            let u = Vec3::random_unit_vector(&mut rng);
            assert!((u.length() - 1.).abs() < 1e-9);

            let r = Vec3::random_range(&mut rng, 0.5, 1.);
            for c in &[r.0, r.1, r.2] {
                assert!(*c >= 0.5 && *c < 1.);
            }
        }
    }
}
