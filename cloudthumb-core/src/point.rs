//! Point types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Narrow a double precision point, as decoders produce, to the render precision.
pub fn narrow_point(point: &Point3d) -> Point3f {
    Point3f::new(point.x as f32, point.y as f32, point.z as f32)
}

/// True when every coordinate is a finite number.
pub fn is_finite_point(point: &Point3f) -> bool {
    point.x.is_finite() && point.y.is_finite() && point.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_point() {
        let p = narrow_point(&Point3d::new(1.5, -2.25, 1.0e-3));
        assert_eq!(p, Point3f::new(1.5, -2.25, 1.0e-3));
    }

    #[test]
    fn test_is_finite_point() {
        assert!(is_finite_point(&Point3f::new(0.0, 1.0, -1.0)));
        assert!(!is_finite_point(&Point3f::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite_point(&Point3f::new(0.0, f32::INFINITY, 0.0)));
    }
}
