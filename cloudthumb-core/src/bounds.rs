//! Axis-aligned bounds of a point cloud

use crate::error::{Error, Result};
use crate::point::Point3f;
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with independent x/y/z extents.
///
/// A box only exists for a non-empty cloud, so `min <= max` holds on every
/// axis of any value handed out by [`compute_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3f,
    pub max: Point3f,
}

impl BoundingBox {
    /// Per-axis midpoint of the box
    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Size of the box along each axis
    pub fn extent(&self) -> (f32, f32, f32) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// `(min_z, max_z)`, the range depth intensities are normalised against
    pub fn depth_range(&self) -> (f32, f32) {
        (self.min.z, self.max.z)
    }

    /// Largest coordinate found on any axis
    pub fn max_component(&self) -> f32 {
        self.max.x.max(self.max.y).max(self.max.z)
    }

    pub fn contains(&self, point: &Point3f) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

/// Trait for objects that can report their spatial extent
pub trait Bounded {
    /// Get the bounding box, failing when the object has no points
    fn bounding_box(&self) -> Result<BoundingBox>;
}

impl Bounded for PointCloud<Point3f> {
    fn bounding_box(&self) -> Result<BoundingBox> {
        compute_bounds(self)
    }
}

/// Compute the axis-aligned bounding box of a point cloud.
///
/// Running minima start at `+inf` and maxima at `-inf` so the first real
/// point always replaces them.
///
/// # Errors
/// Returns [`Error::EmptyInput`] when the cloud has no points.
pub fn compute_bounds(cloud: &PointCloud<Point3f>) -> Result<BoundingBox> {
    if cloud.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut min = Point3f::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
    let mut max = Point3f::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);

    for p in cloud {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    Ok(BoundingBox { min, max })
}
