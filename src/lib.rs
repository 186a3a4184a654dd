//! # cloudthumb
//!
//! Small preview images for 3D point-cloud files.
//!
//! This is the umbrella crate that ties decoding and rendering together.
//! Use the individual crates for finer control over dependencies.
//!
//! ## Features
//!
//! - **Core**: points, point clouds, bounds and the shared error type
//! - **Render**: camera framing, projection and rasterization into a thumbnail
//! - **I/O**: point cloud decoders (PLY)
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudthumb::prelude::*;
//!
//! let cloud = PointCloud::from_points(vec![
//!     Point3f::new(1.0, 0.0, 0.5),
//!     Point3f::new(-1.0, 0.0, -0.5),
//!     Point3f::new(0.0, 1.0, 0.25),
//! ]);
//! let thumbnail = render(&cloud, 96)?;
//! let png = PngSink.accept(&thumbnail, thumbnail.background())?;
//! assert!(!png.is_empty());
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: enables `io`
//! - `io`: file decoding and the `thumbnail_from_*` helpers

pub use cloudthumb_core::*;

pub use cloudthumb_render as render;

#[cfg(feature = "io")]
pub use cloudthumb_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use cloudthumb_core::*;
    pub use cloudthumb_render::*;

    #[cfg(feature = "io")]
    pub use cloudthumb_io::{PointCloudDecoder, PointCloudFormat, PointCloudReader};
}

#[cfg(feature = "io")]
mod glue {
    use cloudthumb_core::Result;
    use cloudthumb_io::PointCloudFormat;
    use cloudthumb_render::{ImageSink, PngSink, ThumbnailRenderer};
    use log::info;
    use std::path::Path;

    /// Render the point cloud file at `path` into PNG bytes of a
    /// `size x size` thumbnail.
    pub fn thumbnail_from_file<P: AsRef<Path>>(path: P, size: u32) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let cloud = cloudthumb_io::read_point_cloud(path)?;
        info!("loaded {} points from {}", cloud.len(), path.display());
        encode(&ThumbnailRenderer::default(), &cloud, size)
    }

    /// Render an in-memory point cloud file into PNG bytes
    pub fn thumbnail_from_bytes(bytes: &[u8], format: PointCloudFormat, size: u32) -> Result<Vec<u8>> {
        let cloud = format.decode(bytes)?;
        encode(&ThumbnailRenderer::default(), &cloud, size)
    }

    fn encode(
        renderer: &ThumbnailRenderer,
        cloud: &cloudthumb_core::PointSet,
        size: u32,
    ) -> Result<Vec<u8>> {
        let thumbnail = renderer.render(cloud, size)?;
        PngSink.accept(&thumbnail, thumbnail.background())
    }
}

#[cfg(feature = "io")]
pub use glue::{thumbnail_from_bytes, thumbnail_from_file};
