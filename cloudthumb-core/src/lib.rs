//! Core data structures for cloudthumb
//!
//! This crate provides the fundamental types shared by the decoding and
//! rendering crates: points, point clouds, axis-aligned bounds and the
//! common error type.

pub mod point;
pub mod point_cloud;
pub mod bounds;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use bounds::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Vector4, Matrix4};

/// A point cloud of single precision points, the input to every render
pub type PointSet = PointCloud<Point3f>;
