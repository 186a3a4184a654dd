//! Projection of 3D points into thumbnail pixel space

use crate::config::RenderConfig;
use cloudthumb_core::{BoundingBox, Point3f};
use log::trace;
use nalgebra::{Matrix4, Point3, Vector4};

/// A projected point: pixel coordinates and a depth intensity.
///
/// Coordinates are not clamped to the canvas; the rasterizer discards
/// anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub intensity: u8,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32, intensity: u8) -> Self {
        Self { x, y, intensity }
    }
}

/// Linear map from z into the 0..=255 intensity range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    min_z: f32,
    max_z: f32,
    flat_intensity: u8,
}

impl DepthRange {
    /// Depth range of `bounds`; `flat_intensity` is used when all z are equal
    pub fn new(bounds: &BoundingBox, flat_intensity: u8) -> Self {
        let (min_z, max_z) = bounds.depth_range();
        Self {
            min_z,
            max_z,
            flat_intensity,
        }
    }

    /// True when the cloud has no extent in z
    pub fn is_flat(&self) -> bool {
        self.max_z <= self.min_z
    }

    pub fn intensity(&self, z: f32) -> u8 {
        if self.is_flat() {
            return self.flat_intensity;
        }
        let value = (z - self.min_z) * 255.0 / (self.max_z - self.min_z);
        // `as` truncates toward zero and saturates
        value.clamp(0.0, 255.0) as u8
    }
}

/// Transforms points through a view and projection into pixel space
#[derive(Debug, Clone)]
pub struct Projector {
    view_projection: Matrix4<f32>,
    depth: DepthRange,
    canvas_size: u32,
}

impl Projector {
    pub fn new(
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        bounds: &BoundingBox,
        canvas_size: u32,
    ) -> Self {
        let flat_intensity = RenderConfig::default().flat_depth_intensity;
        Self::with_depth(
            projection,
            view,
            DepthRange::new(bounds, flat_intensity),
            canvas_size,
        )
    }

    pub fn with_depth(
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        depth: DepthRange,
        canvas_size: u32,
    ) -> Self {
        Self {
            view_projection: projection * view,
            depth,
            canvas_size,
        }
    }

    pub fn depth(&self) -> &DepthRange {
        &self.depth
    }

    /// Normalized device coordinates of `point`, or `None` when the point
    /// is on or behind the camera plane or the transform is not finite.
    pub fn ndc(&self, point: &Point3f) -> Option<Point3<f32>> {
        let clip = self.view_projection * Vector4::new(point.x, point.y, point.z, 1.0);
        // NaN `w` comes from a camera without a view basis
        if clip.w.is_nan() || clip.w <= 0.0 {
            return None;
        }
        let ndc = Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
        if ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite() {
            Some(ndc)
        } else {
            None
        }
    }

    /// Project a point to pixel coordinates with its depth intensity.
    ///
    /// Pixel coordinates are floored, so a point anywhere inside a pixel's
    /// square maps to that pixel, and image row 0 is the top of the frame.
    pub fn project(&self, point: &Point3f) -> Option<ScreenPoint> {
        let Some(ndc) = self.ndc(point) else {
            trace!("dropping {point:?}: on or behind the camera plane");
            return None;
        };

        let size = self.canvas_size as f32;
        let px = (ndc.x + 1.0) / 2.0 * size;
        let py = (1.0 - ndc.y) / 2.0 * size;

        Some(ScreenPoint {
            x: px.floor() as i32,
            y: py.floor() as i32,
            intensity: self.depth.intensity(point.z),
        })
    }
}

/// Project a single point with explicit matrices.
///
/// Convenience over [`Projector`] for one-off projections; renders reuse a
/// `Projector` so the combined matrix is computed once.
pub fn project(
    point: &Point3f,
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    bounds: &BoundingBox,
    canvas_size: u32,
) -> Option<ScreenPoint> {
    Projector::new(projection, view, bounds, canvas_size).project(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::build_camera;
    use approx::assert_relative_eq;

    fn cube_bounds() -> BoundingBox {
        BoundingBox {
            min: Point3f::new(-1.0, -1.0, -1.0),
            max: Point3f::new(1.0, 1.0, 1.0),
        }
    }

    #[test]
    fn test_target_projects_to_center() {
        let bounds = BoundingBox {
            min: Point3f::new(-0.5, 0.0, 0.25),
            max: Point3f::new(1.5, 2.0, 1.0),
        };
        let (projection, view) = build_camera(&bounds).unwrap();

        for size in [16, 64, 255, 1024] {
            let projector = Projector::new(&projection, &view, &bounds, size);
            let ndc = projector.ndc(&bounds.center()).unwrap();
            assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);

            let p = projector.project(&bounds.center()).unwrap();
            let half = (size / 2) as i32;
            assert!((p.x - half).abs() <= 1, "x={} size={size}", p.x);
            assert!((p.y - half).abs() <= 1, "y={} size={size}", p.y);
        }
    }

    #[test]
    fn test_intensity_is_monotonic_in_z() {
        let depth = DepthRange::new(&cube_bounds(), 0);
        let mut previous = 0u8;
        for step in 0..=100 {
            let z = -1.0 + step as f32 * 0.02;
            let value = depth.intensity(z);
            assert!(value >= previous, "z={z} gave {value} < {previous}");
            previous = value;
        }
        assert_eq!(depth.intensity(-1.0), 0);
        assert_eq!(depth.intensity(0.0), 127);
        assert_eq!(depth.intensity(1.0), 255);
    }

    #[test]
    fn test_flat_depth_uses_fixed_intensity() {
        let bounds = BoundingBox {
            min: Point3f::new(0.0, 0.0, 2.0),
            max: Point3f::new(1.0, 1.0, 2.0),
        };
        let depth = DepthRange::new(&bounds, 42);
        assert!(depth.is_flat());
        assert_eq!(depth.intensity(2.0), 42);
        assert_eq!(DepthRange::new(&bounds, 0).intensity(2.0), 0);
    }

    #[test]
    fn test_points_behind_camera_are_dropped() {
        let bounds = cube_bounds();
        let (projection, view) = build_camera(&bounds).unwrap();
        let projector = Projector::new(&projection, &view, &bounds, 64);

        // eye is at (2, 2, 2) looking toward the origin
        assert!(projector.project(&Point3f::new(4.0, 4.0, 4.0)).is_none());
        assert!(projector.project(&Point3f::new(0.0, 0.0, 0.0)).is_some());
    }

    #[test]
    fn test_vertical_axis_is_flipped() {
        let bounds = BoundingBox {
            min: Point3f::new(-1.0, 0.0, -0.5),
            max: Point3f::new(1.0, 1.0, 0.5),
        };
        let (projection, view) = build_camera(&bounds).unwrap();
        let projector = Projector::new(&projection, &view, &bounds, 64);

        let low = projector.project(&Point3f::new(0.0, 0.0, 0.25)).unwrap();
        let high = projector.project(&Point3f::new(0.0, 1.0, 0.25)).unwrap();
        assert!(high.y < low.y, "higher world y must be nearer row 0");
    }

    #[test]
    fn test_out_of_frame_points_are_not_clamped() {
        let bounds = cube_bounds();
        let (projection, view) = build_camera(&bounds).unwrap();
        let projector = Projector::new(&projection, &view, &bounds, 64);

        let p = projector.project(&Point3f::new(-20.0, 0.0, 0.0)).unwrap();
        assert!(p.x < 0 || p.x >= 64 || p.y < 0 || p.y >= 64, "{p:?}");
    }

    #[test]
    fn test_free_function_matches_projector() {
        let bounds = cube_bounds();
        let (projection, view) = build_camera(&bounds).unwrap();
        let point = Point3f::new(0.5, -0.25, 0.75);
        assert_eq!(
            project(&point, &projection, &view, &bounds, 128),
            Projector::new(&projection, &view, &bounds, 128).project(&point)
        );
    }
}
