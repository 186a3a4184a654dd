//! Camera placement for thumbnails

use crate::config::RenderConfig;
use cloudthumb_core::{BoundingBox, Error, Point3f, Result, Vector3f};
use log::{debug, warn};
use nalgebra::{Matrix4, Perspective3};

/// A perspective camera looking at a point cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3f,
        target: Point3f,
        up: Vector3f,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Place a camera so that it frames the given bounds.
    ///
    /// The eye sits at twice the maximum x and y of the cloud and at twice
    /// its largest coordinate in z, looking at the box centre with +y up.
    /// This is a heuristic: very flat or very elongated clouds can end up
    /// clipped or small in frame.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] when every point coincides and the eye
    /// lands on that point or straight above or below it. Other clouds that
    /// leave the look-at basis undefined still get a camera; its view matrix
    /// is non-finite and every point is dropped during projection.
    pub fn frame_bounds(bounds: &BoundingBox, config: &RenderConfig) -> Result<Self> {
        config.validate()?;

        let position = Point3f::new(
            2.0 * bounds.max.x,
            2.0 * bounds.max.y,
            2.0 * bounds.max_component(),
        );
        let target = bounds.center();
        let up = Vector3f::y();

        let direction = target - position;
        let basis_undefined = direction.cross(&up) == Vector3f::zeros();
        if basis_undefined {
            if bounds.min == bounds.max {
                return Err(Error::DegenerateGeometry(format!(
                    "all points coincide at {target:?} and the camera cannot look at them from {position:?}"
                )));
            }
            warn!("camera at {position:?} has no view basis toward {target:?}; nothing will be drawn");
        }

        debug!("camera eye={position:?} target={target:?}");

        Ok(Self::new(
            position,
            target,
            up,
            config.fov_y_radians(),
            config.aspect_ratio,
            config.z_near,
            config.z_far,
        ))
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }
}

/// Build the `(projection, view)` matrices that frame `bounds` with the
/// default render configuration.
pub fn build_camera(bounds: &BoundingBox) -> Result<(Matrix4<f32>, Matrix4<f32>)> {
    let camera = Camera::frame_bounds(bounds, &RenderConfig::default())?;
    Ok((camera.projection_matrix(), camera.view_matrix()))
}
