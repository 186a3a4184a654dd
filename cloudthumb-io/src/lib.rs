//! Point cloud decoders
//!
//! This crate turns raw file contents into a [`PointCloud`] of positions.
//! Only vertex positions are read; colors, normals and faces are ignored
//! because thumbnails are shaded from depth alone.

pub mod ply;

pub use ply::PlyReader;

use cloudthumb_core::{Error, Point3f, PointCloud, Result};
use std::path::Path;

/// Trait for decoding point clouds from an in-memory file image
pub trait PointCloudDecoder {
    fn decode_point_cloud(bytes: &[u8]) -> Result<PointCloud<Point3f>>;
}

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<Point3f>>;
}

/// File formats a thumbnail can be produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCloudFormat {
    Ply,
}

impl PointCloudFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        match extension.as_deref() {
            Some("ply") => Ok(PointCloudFormat::Ply),
            _ => Err(Error::UnsupportedFormat(format!(
                "Unsupported point cloud format: {}",
                path.display()
            ))),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<PointCloud<Point3f>> {
        match self {
            PointCloudFormat::Ply => PlyReader::decode_point_cloud(bytes),
        }
    }
}

/// Auto-detect format and read point cloud
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<Point3f>> {
    let path = path.as_ref();
    match PointCloudFormat::from_path(path)? {
        PointCloudFormat::Ply => PlyReader::read_point_cloud(path),
    }
}

/// Decode a point cloud from bytes whose format is already known
pub fn decode_point_cloud(bytes: &[u8], format: PointCloudFormat) -> Result<PointCloud<Point3f>> {
    format.decode(bytes)
}
