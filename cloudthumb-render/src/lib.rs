//! Point cloud thumbnail rendering
//!
//! Turns a point cloud into a small square preview image:
//! - camera placement derived from the cloud's bounds
//! - perspective projection of every point into pixel space
//! - depth-shaded single-pixel rasterization
//!
//! Rendering is synchronous and allocation-bounded; every call owns its
//! matrices and output image, so renders on separate threads never share
//! state.
//!
//! ```rust
//! use cloudthumb_core::{PointCloud, Point3f};
//!
//! let cloud = PointCloud::from_points(vec![
//!     Point3f::new(1.0, 0.0, 0.5),
//!     Point3f::new(-1.0, 0.0, -0.5),
//!     Point3f::new(0.0, 1.0, 0.25),
//! ]);
//! let thumbnail = cloudthumb_render::render(&cloud, 64)?;
//! assert_eq!(thumbnail.size(), 64);
//! # Ok::<(), cloudthumb_core::Error>(())
//! ```

pub mod camera;
pub mod config;
pub mod pipeline;
pub mod projector;
pub mod rasterizer;
pub mod thumbnail;

pub use camera::*;
pub use config::*;
pub use pipeline::*;
pub use projector::*;
pub use rasterizer::*;
pub use thumbnail::*;
