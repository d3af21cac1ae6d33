use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// An object in a scene.
///
/// The primary purpose of an `Object` is to interact with rays of light using
/// the `hit` method.
pub trait Object: std::fmt::Debug + Sync + Send {
    /// Tests if `ray` intersects the object `self`, and if so, if that
    /// intersection occurs within `t_range` along the ray. (Recall that `Ray`
    /// is defined in terms of a `t` value that refers to points along the ray.)
    ///
    /// The `t_range` serves two purposes here. First, if the intersection
    /// occurs at *negative* `t`, the object is behind the photons instead of in
    /// front of them, and the intersection is an illusion. Second, while the
    /// upper end of `t_range` starts out as infinity, we adjust it down as we
    /// find objects along `ray`. Once we've found an object at position `t`, we
    /// can ignore any objects at positions greater than `t`.
    ///
    /// The lower end should be slightly above zero, so that a ray leaving a
    /// surface doesn't immediately hit that same surface again.
    fn hit<'o>(&'o self, ray: &Ray, t_range: RangeInclusive<f64>) -> Option<HitRecord<'o>>;
}

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
    /// Material of the sphere. May be shared with other objects.
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Object for Sphere {
    #[inline]
    fn hit<'o>(&'o self, ray: &Ray, t_range: RangeInclusive<f64>) -> Option<HitRecord<'o>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0. {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        // Nearest root first.
        for &t in &[(-half_b - sqrtd) / a, (-half_b + sqrtd) / a] {
            if t_range.contains(&t) {
                let p = ray.at(t);
                let outward_normal = (p - self.center) / self.radius;
                return Some(HitRecord::with_face_normal(
                    ray,
                    t,
                    p,
                    outward_normal,
                    &self.material,
                ));
            }
        }
        None
    }
}

/// A description of a `Ray` hitting an `Object`. This stores information needed
/// for rendering later.
///
/// The `'m` lifetime refers to the `Material` of the `Object`, which we capture
/// by reference. Thus, a `HitRecord` cannot outlive the `Object` it refers to.
#[derive(Clone, Debug)]
pub struct HitRecord<'m> {
    /// Position along the ray, in units of the ray's direction vector.
    pub t: f64,
    /// Position along the ray, as an actual point.
    pub p: Point3,
    /// Surface normal of the object at the hit position. Always points against
    /// the incoming ray.
    pub normal: Vec3,
    /// Whether the ray struck the outside of the surface.
    pub front_face: bool,
    /// Material of the object at the hit position.
    pub material: &'m Material,
}

impl<'m> HitRecord<'m> {
    /// Builds a record from the surface's outward normal, flipping it if the
    /// ray is coming from inside.
    pub fn with_face_normal(
        ray: &Ray,
        t: f64,
        p: Point3,
        outward_normal: Vec3,
        material: &'m Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        HitRecord {
            t,
            p,
            normal,
            front_face,
            material,
        }
    }
}
