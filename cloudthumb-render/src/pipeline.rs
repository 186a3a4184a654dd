//! End-to-end thumbnail rendering

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::projector::{DepthRange, Projector};
use crate::rasterizer::Rasterizer;
use crate::thumbnail::Thumbnail;
use cloudthumb_core::{compute_bounds, Error, Point3f, PointCloud, Result};
use log::{debug, warn};

/// Per-render point accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub points: usize,
    pub drawn: usize,
    /// Projected outside the canvas
    pub clipped: usize,
    /// On or behind the camera plane, or not projectable at all
    pub dropped: usize,
}

/// Renders point clouds into thumbnails with a fixed configuration.
///
/// A renderer holds no per-request state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailRenderer {
    config: RenderConfig,
}

impl ThumbnailRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, cloud: &PointCloud<Point3f>, canvas_size: u32) -> Result<Thumbnail> {
        self.render_with_report(cloud, canvas_size)
            .map(|(thumbnail, _)| thumbnail)
    }

    /// Render `cloud` into a `canvas_size` square thumbnail.
    ///
    /// Points are projected and drawn in input order in a single pass.
    pub fn render_with_report(
        &self,
        cloud: &PointCloud<Point3f>,
        canvas_size: u32,
    ) -> Result<(Thumbnail, RenderReport)> {
        if canvas_size == 0 {
            return Err(Error::InvalidCanvasSize(canvas_size));
        }

        let bounds = compute_bounds(cloud)?;
        debug!(
            "rendering {} points, bounds min={:?} max={:?}",
            cloud.len(),
            bounds.min,
            bounds.max
        );

        let camera = Camera::frame_bounds(&bounds, &self.config)?;
        let depth = DepthRange::new(&bounds, self.config.flat_depth_intensity);
        if depth.is_flat() {
            warn!(
                "all points share z={}, shading with flat intensity {}",
                bounds.min.z, self.config.flat_depth_intensity
            );
        }

        let projector = Projector::with_depth(
            &camera.projection_matrix(),
            &camera.view_matrix(),
            depth,
            canvas_size,
        );
        let rasterizer = Rasterizer::with_config(canvas_size, &self.config);

        let mut dropped = 0;
        let projected = cloud.iter().filter_map(|point| {
            let screen = projector.project(point);
            if screen.is_none() {
                dropped += 1;
            }
            screen
        });
        let (thumbnail, stats) = rasterizer.rasterize_with_stats(projected)?;

        let report = RenderReport {
            points: cloud.len(),
            drawn: stats.drawn,
            clipped: stats.clipped,
            dropped,
        };
        debug!(
            "rendered {size}x{size}: {} drawn, {} clipped, {} behind camera",
            report.drawn,
            report.clipped,
            report.dropped,
            size = canvas_size
        );

        Ok((thumbnail, report))
    }
}

/// Render a point cloud with the default configuration
pub fn render(cloud: &PointCloud<Point3f>, canvas_size: u32) -> Result<Thumbnail> {
    ThumbnailRenderer::default().render(cloud, canvas_size)
}
