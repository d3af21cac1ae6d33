#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod material;
pub mod object;
pub mod ray;
pub mod scene;
pub mod vec3;

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;

pub use crate::camera::Camera;
pub use crate::config::{ConfigError, RenderConfig};
pub use crate::material::Material;
pub use crate::object::{HitRecord, Object, Sphere};
pub use crate::ray::Ray;
pub use crate::scene::{random_scene, Scene};
use crate::vec3::{Channel::*, *};

/// Closest distance along a ray at which we accept a hit. Keeps scattered rays
/// from re-hitting the surface they just left.
pub const NEAR: f64 = 0.001;

/// Default bounce limit for `color`.
pub const MAX_DEPTH: u32 = 50;

pub trait World: Send + Sync {
    fn hit_top<'a>(&'a self, ray: &Ray) -> Option<HitRecord<'a>>;
}

impl<'r, T: World + ?Sized> World for &'r T {
    fn hit_top<'a>(&'a self, ray: &Ray) -> Option<HitRecord<'a>> {
        (*self).hit_top(ray)
    }
}

impl World for Scene {
    fn hit_top<'a>(&'a self, ray: &Ray) -> Option<HitRecord<'a>> {
        self.hit(ray, NEAR..=f64::INFINITY)
    }
}

/// Color of the sky seen along `ray`: a vertical blend from white straight
/// down to pale blue straight up.
pub fn sky(ray: &Ray) -> Color {
    let unit_direction = ray.direction.into_unit();
    let t = 0.5 * (unit_direction.1 + 1.);
    (1. - t) * Vec3::from(1.) + t * Vec3(0.5, 0.7, 1.0)
}

/// Computes the linear color seen along `ray` for the scene of objects
/// `world`, following at most `max_depth` surface interactions.
///
/// This is the actual ray-tracing routine.
pub fn color(world: &impl World, mut ray: Ray, max_depth: u32, rng: &mut impl Rng) -> Color {
    // Records the cumulative (product) attenuation of each surface we've
    // visited so far.
    let mut strength = Vec3::from(1.);

    // Iterate until one of the following conditions is reached:
    // 1. The ray escapes into the sky (i.e. no objects are hit).
    // 2. The ray reaches a surface that absorbs it.
    // 3. The ray runs out of bounces, which gathers no more light.
    for _ in 0..max_depth {
        let hit = match world.hit_top(&ray) {
            Some(hit) => hit,
            None => return strength * sky(&ray),
        };

        if let Some((new_ray, attenuation)) = hit.material.scatter(&ray, &hit, rng) {
            // Redirect flight, accumulate the new attenuation value.
            ray = new_ray;
            strength = strength * attenuation;
        } else {
            // Locally absorbed; we're done.
            return Vec3::default();
        }
    }

    Vec3::default()
}

/// Takes one sample at normalized image-plane coordinates `(u, v)`.
pub fn sample(
    world: &impl World,
    camera: &Camera,
    u: f64,
    v: f64,
    max_depth: u32,
    rng: &mut impl Rng,
) -> Color {
    let r = camera.get_ray(u, v, rng);
    color(world, r, max_depth, rng)
}

/// A rendered image of averaged linear colors, top scanline first.
#[derive(Clone, Debug, PartialEq)]
pub struct Image(Vec<Vec<Color>>);

impl Image {
    pub fn par_compute(nx: usize, ny: usize, f: impl Fn(usize, usize) -> Color + Sync) -> Image {
        let progress = Progress::new(ny);
        Image(
            (0..ny)
                .into_par_iter()
                .rev()
                .map(|y| {
                    let row: Vec<Color> = (0..nx).map(|x| f(x, y)).collect();
                    progress.row_done();
                    row
                })
                .collect(),
        )
    }

    pub fn compute(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> Color) -> Image {
        let progress = Progress::new(ny);
        Image(
            (0..ny)
                .rev()
                .map(|y| {
                    let row: Vec<Color> = (0..nx).map(|x| f(x, y)).collect();
                    progress.row_done();
                    row
                })
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.0.iter().map(Vec::as_slice)
    }
}

/// Counts down finished scanlines and logs how many are left.
///
/// Rows may finish in any order when rendered in parallel; only the count is
/// reported.
#[derive(Debug)]
pub struct Progress {
    remaining: AtomicUsize,
}

impl Progress {
    pub fn new(rows: usize) -> Self {
        Progress {
            remaining: AtomicUsize::new(rows),
        }
    }

    /// Marks one scanline finished, returning the number still to go.
    pub fn row_done(&self) -> usize {
        let left = self
            .remaining
            .fetch_sub(1, Ordering::Relaxed)
            .saturating_sub(1);
        log::info!("scanlines remaining: {}", left);
        left
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }
}

/// Writes `image` as an ASCII PPM, gamma-encoding each channel with gamma 2.
pub fn write_ppm(image: &Image, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for scanline in image.rows() {
        for col in scanline {
            let col = col.map(f64::sqrt);

            fn to_u8(x: f64) -> i32 {
                (256. * x.max(0.).min(0.999)) as i32
            }

            let ir = to_u8(col[R]);
            let ig = to_u8(col[G]);
            let ib = to_u8(col[B]);

            writeln!(out, "{} {} {}", ir, ig, ib)?;
        }
    }
    Ok(())
}

/// Generator for laying out a scene from `seed`.
pub fn scene_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Each pixel draws from its own generator, so the result doesn't depend on
/// how pixels are distributed across threads.
///
/// The pixel index is offset by one so that no pixel reuses the scene's
/// stream for the same `seed`.
fn pixel_rng(seed: u64, x: usize, y: usize) -> SmallRng {
    let index = ((y as u64) << 32 | x as u64).wrapping_add(1);
    SmallRng::seed_from_u64(seed ^ index)
}

/// Averages `ns` samples for pixel `(x, y)` of an `nx` by `ny` image.
fn render_pixel(
    (x, y): (usize, usize),
    (nx, ny, ns): (usize, usize, usize),
    camera: &Camera,
    world: &impl World,
    max_depth: u32,
    seed: u64,
) -> Color {
    let mut rng = pixel_rng(seed, x, y);
    let du = (nx.max(2) - 1) as f64;
    let dv = (ny.max(2) - 1) as f64;
    let col: Color = (0..ns)
        .map(|_| {
            let u = (x as f64 + rng.gen::<f64>()) / du;
            let v = (y as f64 + rng.gen::<f64>()) / dv;
            sample(world, camera, u, v, max_depth, &mut rng)
        })
        .sum();
    col / ns as f64
}

pub fn par_cast(
    nx: usize,
    ny: usize,
    ns: usize,
    camera: &Camera,
    world: impl World,
    max_depth: u32,
    seed: u64,
) -> Image {
    log::debug!("casting {}x{} at {} spp across threads", nx, ny, ns);
    Image::par_compute(nx, ny, |x, y| {
        render_pixel((x, y), (nx, ny, ns), camera, &world, max_depth, seed)
    })
}

pub fn cast(
    nx: usize,
    ny: usize,
    ns: usize,
    camera: &Camera,
    world: impl World,
    max_depth: u32,
    seed: u64,
) -> Image {
    log::debug!("casting {}x{} at {} spp", nx, ny, ns);
    Image::compute(nx, ny, |x, y| {
        render_pixel((x, y), (nx, ny, ns), camera, &world, max_depth, seed)
    })
}
