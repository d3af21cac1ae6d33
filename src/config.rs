use crate::camera::Camera;
use crate::vec3::{Point3, Vec3};

/// Things `RenderConfig::validate` refuses to render.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,
    #[error("aspect ratio must be positive and finite, got {0}")]
    BadAspect(f64),
    #[error("need at least one sample per pixel")]
    ZeroSamples,
    #[error("max depth must be at least 1")]
    ZeroDepth,
    #[error("vertical field of view must be strictly between 0 and 180 degrees, got {0}")]
    BadFov(f64),
    #[error("aperture must be non-negative, got {0}")]
    BadAperture(f64),
    #[error("focus distance must be positive, got {0}")]
    BadFocusDistance(f64),
    #[error("camera looks from and at the same point {0:?}")]
    DegenerateView(Point3),
}

/// Everything needed to render the random scene, short of the scene itself.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: usize,
    /// Width over height.
    pub aspect: f64,
    pub samples: usize,
    pub max_depth: u32,
    pub seed: u64,
    pub look_from: Point3,
    pub look_at: Point3,
    pub up: Vec3,
    /// Vertical field of view, in degrees.
    pub vfov: f64,
    pub aperture: f64,
    pub focus_dist: f64,
    /// Render with rayon instead of on the calling thread.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1200,
            aspect: 3. / 2.,
            samples: 10,
            max_depth: crate::MAX_DEPTH,
            seed: 0xDEADBEEF,
            look_from: Vec3(13., 2., 3.),
            look_at: Vec3(0., 0., 0.),
            up: Vec3(0., 1., 0.),
            vfov: 20.,
            aperture: 0.1,
            focus_dist: 10.,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Image height implied by `width` and `aspect`, never less than 1.
    pub fn image_height(&self) -> usize {
        ((self.width as f64 / self.aspect) as usize).max(1)
    }

    pub fn camera(&self) -> Camera {
        Camera::look(
            self.look_from,
            self.look_at,
            self.up,
            self.vfov,
            self.aspect,
            self.aperture,
            self.focus_dist,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(self.aspect.is_finite() && self.aspect > 0.) {
            return Err(ConfigError::BadAspect(self.aspect));
        }
        if self.samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !(self.vfov > 0. && self.vfov < 180.) {
            return Err(ConfigError::BadFov(self.vfov));
        }
        if !(self.aperture >= 0.) {
            return Err(ConfigError::BadAperture(self.aperture));
        }
        if !(self.focus_dist > 0.) {
            return Err(ConfigError::BadFocusDistance(self.focus_dist));
        }
        if (self.look_from - self.look_at).is_near_zero() {
            return Err(ConfigError::DegenerateView(self.look_from));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RenderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.image_height(), 800);
    }

    fn rejects(tweak: impl FnOnce(&mut RenderConfig), expected: ConfigError) {
        let mut config = RenderConfig::default();
        tweak(&mut config);
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn rejects_bad_fields() {
        rejects(|c| c.width = 0, ConfigError::ZeroWidth);
        rejects(|c| c.aspect = 0., ConfigError::BadAspect(0.));
        rejects(|c| c.samples = 0, ConfigError::ZeroSamples);
        rejects(|c| c.max_depth = 0, ConfigError::ZeroDepth);
        rejects(|c| c.vfov = 180., ConfigError::BadFov(180.));
        rejects(|c| c.aperture = -1., ConfigError::BadAperture(-1.));
        rejects(|c| c.focus_dist = 0., ConfigError::BadFocusDistance(0.));
        rejects(
            |c| c.look_at = c.look_from,
            ConfigError::DegenerateView(Vec3(13., 2., 3.)),
        );
    }

    #[test]
    fn nan_aspect_is_rejected() {
        let config = RenderConfig {
            aspect: f64::NAN,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BadAspect(_))));
    }

    #[test]
    fn tall_images_keep_one_row_minimum() {
        let config = RenderConfig {
            width: 1,
            aspect: 4.,
            ..RenderConfig::default()
        };
        assert_eq!(config.image_height(), 1);
    }
}
