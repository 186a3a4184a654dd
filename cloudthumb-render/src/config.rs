//! Render configuration

use cloudthumb_core::{Error, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};

/// Camera and shading parameters for a thumbnail render.
///
/// The defaults reproduce the reference look: a 45 degree square frustum
/// from 0.1 to 10 units, black background and a red channel fixed at 126.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub aspect_ratio: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Canvas color before any point is drawn
    pub background: [u8; 3],
    /// Red channel of every drawn point; green and blue carry the depth intensity
    pub base_red: u8,
    /// Intensity used when every point shares one z value
    pub flat_depth_intensity: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect_ratio: 1.0,
            z_near: 0.1,
            z_far: 10.0,
            background: [0, 0, 0],
            base_red: 126,
            flat_depth_intensity: 0,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_base_red(mut self, base_red: u8) -> Self {
        self.base_red = base_red;
        self
    }

    pub fn with_flat_depth_intensity(mut self, intensity: u8) -> Self {
        self.flat_depth_intensity = intensity;
        self
    }

    pub fn with_clip_planes(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn background_color(&self) -> Rgb<u8> {
        Rgb(self.background)
    }

    /// Check that the frustum parameters describe a usable projection
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_y_degrees
            )));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if !(self.z_near > 0.0 && self.z_far > self.z_near && self.z_far.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.z_near, self.z_far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_reference_look() {
        let config = RenderConfig::default();
        assert_eq!(config.fov_y_degrees, 45.0);
        assert_eq!(config.aspect_ratio, 1.0);
        assert_eq!(config.z_near, 0.1);
        assert_eq!(config.z_far, 10.0);
        assert_eq!(config.background_color(), Rgb([0, 0, 0]));
        assert_eq!(config.base_red, 126);
        assert_relative_eq!(config.fov_y_radians(), std::f32::consts::FRAC_PI_4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = RenderConfig::new()
            .with_background([10, 20, 30])
            .with_base_red(200)
            .with_flat_depth_intensity(255)
            .with_clip_planes(0.5, 50.0);
        assert_eq!(config.background, [10, 20, 30]);
        assert_eq!(config.base_red, 200);
        assert_eq!(config.flat_depth_intensity, 255);
        assert_eq!((config.z_near, config.z_far), (0.5, 50.0));
    }

    #[test]
    fn test_validate_rejects_bad_frustum() {
        assert!(RenderConfig::new().with_clip_planes(1.0, 1.0).validate().is_err());
        assert!(RenderConfig::new().with_clip_planes(0.0, 1.0).validate().is_err());

        let mut config = RenderConfig::new();
        config.fov_y_degrees = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = RenderConfig::new();
        config.aspect_ratio = -1.0;
        assert!(config.validate().is_err());
    }
}
