use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::prelude::*;

use crate::material::Material;
use crate::object::{HitRecord, Object, Sphere};
use crate::ray::Ray;
use crate::vec3::Vec3;

/// An ordered collection of objects.
///
/// The scene owns its objects, but objects only share their materials, so
/// one `Material` may back any number of them.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Box<dyn Object>>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    pub fn add(&mut self, object: impl Object + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Finds the nearest intersection of `ray` with any object in the scene,
    /// within `t_range`.
    ///
    /// Every object is tested; each hit tightens the upper bound so later
    /// objects can only replace it with something nearer (or equally near).
    pub fn hit<'a>(&'a self, ray: &Ray, t_range: RangeInclusive<f64>) -> Option<HitRecord<'a>> {
        let t_min = *t_range.start();
        let mut nearest = *t_range.end();
        let mut hit = None;

        for obj in &self.objects {
            if let Some(rec) = obj.hit(ray, t_min..=nearest) {
                nearest = rec.t;
                hit = Some(rec);
            }
        }

        hit
    }
}

/// Builds the random field of small spheres around three large ones.
pub fn random_scene(rng: &mut impl Rng) -> Scene {
    let mut world = Scene::new();

    world.add(Sphere::new(
        Vec3(0., -1000., 0.),
        1000.,
        Arc::new(Material::Lambertian {
            albedo: Vec3::from(0.5),
        }),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = rng.gen::<f64>();
            let center = Vec3(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Vec3(4., 0.2, 0.)).length() > 0.9 {
                let material = if choose_mat < 0.8 {
                    Material::Lambertian {
                        albedo: rng.gen::<Vec3>() * rng.gen::<Vec3>(),
                    }
                } else if choose_mat < 0.95 {
                    Material::metal(
                        Vec3::random_range(rng, 0.5, 1.),
                        rng.gen_range(0. ..0.5),
                    )
                } else {
                    Material::Dielectric { ref_idx: 1.5 }
                };
                world.add(Sphere::new(center, 0.2, Arc::new(material)));
            }
        }
    }

    world.add(Sphere::new(
        Vec3(0., 1., 0.),
        1.0,
        Arc::new(Material::Dielectric { ref_idx: 1.5 }),
    ));

    world.add(Sphere::new(
        Vec3(-4., 1., 0.),
        1.0,
        Arc::new(Material::Lambertian {
            albedo: Vec3(0.4, 0.2, 0.1),
        }),
    ));

    world.add(Sphere::new(
        Vec3(4., 1., 0.),
        1.0,
        Arc::new(Material::metal(Vec3(0.7, 0.6, 0.5), 0.)),
    ));

    log::debug!("random scene has {} objects", world.len());
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;

    fn grey() -> Arc<Material> {
        Arc::new(Material::Lambertian {
            albedo: Vec3::from(0.5),
        })
    }

    fn down_z() -> Ray {
        Ray {
            origin: Vec3::default(),
            direction: Vec3(0., 0., -1.),
        }
    }

    #[test]
    fn nearest_of_overlapping_spheres_wins_in_either_order() {
        let near = Sphere::new(Vec3(0., 0., -2.), 1., grey());
        let far = Sphere::new(Vec3(0., 0., -2.5), 1., grey());

        let mut scene = Scene::new();
        scene.add(far.clone());
        scene.add(near.clone());
        let hit = scene.hit(&down_z(), 0.001..=f64::INFINITY).unwrap();
        assert!((hit.t - 1.).abs() < 1e-9);

        let mut scene = Scene::new();
        scene.add(near);
        scene.add(far);
        let hit = scene.hit(&down_z(), 0.001..=f64::INFINITY).unwrap();
        assert!((hit.t - 1.).abs() < 1e-9);
    }

    #[test]
    fn reports_material_of_nearest_object() {
        let red = Arc::new(Material::Lambertian {
            albedo: Vec3(1., 0., 0.),
        });
        let blue = Arc::new(Material::Lambertian {
            albedo: Vec3(0., 0., 1.),
        });
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3(0., 0., -10.), 1., Arc::clone(&blue)));
        scene.add(Sphere::new(Vec3(0., 0., -3.), 1., Arc::clone(&red)));
        scene.add(Sphere::new(Vec3(0., 0., -20.), 1., blue));

        let hit = scene.hit(&down_z(), 0.001..=f64::INFINITY).unwrap();
        assert_eq!(*hit.material, *red);
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.hit(&down_z(), 0.001..=f64::INFINITY).is_none());
    }

    #[test]
    fn respects_caller_range() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3(0., 0., -5.), 1., grey()));
        assert!(scene.hit(&down_z(), 0.001..=3.).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn equal_t_resolves_to_later_member() {
        let red = Arc::new(Material::Lambertian {
            albedo: Vec3(1., 0., 0.),
        });
        let blue = Arc::new(Material::Lambertian {
            albedo: Vec3(0., 0., 1.),
        });
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3(0., 0., -2.), 1., Arc::clone(&red)));
        scene.add(Sphere::new(Vec3(0., 0., -2.), 1., Arc::clone(&blue)));

        let hit = scene.hit(&down_z(), 0.001..=f64::INFINITY).unwrap();
        assert_eq!(hit.t, 1.);
        assert!(std::ptr::eq(hit.material, &*blue));

        // And the other way round.
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3(0., 0., -2.), 1., Arc::clone(&blue)));
        scene.add(Sphere::new(Vec3(0., 0., -2.), 1., Arc::clone(&red)));
        let hit = scene.hit(&down_z(), 0.001..=f64::INFINITY).unwrap();
        assert!(std::ptr::eq(hit.material, &*red));
    }

    #[test]
    fn random_scene_layout() {
        let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
        let scene = random_scene(&mut rng);
        // Ground plus three features, plus at most 22 * 22 small spheres.
        assert!(scene.len() > 4);
        assert!(scene.len() <= 4 + 22 * 22);

        // Straight down onto the ground from above the grid, well clear of it.
        let ray = Ray {
            origin: Vec3(30., 5., 30.),
            direction: Vec3(0., -1., 0.),
        };
        let hit = scene.hit(&ray, 0.001..=f64::INFINITY).unwrap();
        assert!(((hit.p - Vec3(0., -1000., 0.)).length() - 1000.).abs() < 1e-6);
        assert!(hit.front_face);
    }
}
