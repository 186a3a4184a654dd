//! Point cloud container

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered collection of points decoded from a single file.
///
/// The renderer only ever reads a cloud, so there is no mutable indexing.
/// Insertion order is preserved because it decides which point wins when
/// several land on the same pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point; used by decoders while building the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3f;

    #[test]
    fn test_preserves_insertion_order() {
        let mut cloud = PointCloud::with_capacity(3);
        cloud.push(Point3f::new(3.0, 0.0, 0.0));
        cloud.push(Point3f::new(1.0, 0.0, 0.0));
        cloud.push(Point3f::new(2.0, 0.0, 0.0));

        let xs: Vec<f32> = cloud.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
        assert_eq!(cloud[1].x, 1.0);
    }

    #[test]
    fn test_collect_into_cloud() {
        let cloud: PointCloud<Point3f> = (0..4)
            .map(|i| Point3f::new(i as f32, 0.0, 0.0))
            .collect();
        assert_eq!(cloud.len(), 4);
        assert!(!cloud.is_empty());
        assert!(PointCloud::<Point3f>::default().is_empty());
    }
}
