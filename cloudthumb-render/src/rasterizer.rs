//! Single-pixel point rasterization

use crate::config::RenderConfig;
use crate::projector::ScreenPoint;
use crate::thumbnail::Thumbnail;
use cloudthumb_core::Result;
use image::Rgb;

/// Counts reported by a rasterization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub drawn: usize,
    /// Points that fell outside the canvas
    pub clipped: usize,
}

/// Writes screen points into a square canvas, one pixel per point.
///
/// There is no depth test: when several points land on the same pixel the
/// last one in input order wins.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    canvas_size: u32,
    background: Rgb<u8>,
    base_red: u8,
}

impl Rasterizer {
    pub fn new(canvas_size: u32) -> Self {
        Self::with_config(canvas_size, &RenderConfig::default())
    }

    pub fn with_config(canvas_size: u32, config: &RenderConfig) -> Self {
        Self {
            canvas_size,
            background: config.background_color(),
            base_red: config.base_red,
        }
    }

    /// Color of a point: fixed red, intensity in green and blue
    pub fn shade(&self, intensity: u8) -> Rgb<u8> {
        Rgb([self.base_red, intensity, intensity])
    }

    /// Draw a single point, returning whether it landed on the canvas
    pub fn draw(&self, canvas: &mut Thumbnail, point: ScreenPoint) -> bool {
        canvas.put_pixel_checked(point.x, point.y, self.shade(point.intensity))
    }

    /// Rasterize `points` onto a fresh background-filled canvas
    pub fn rasterize<I>(&self, points: I) -> Result<Thumbnail>
    where
        I: IntoIterator<Item = ScreenPoint>,
    {
        self.rasterize_with_stats(points).map(|(canvas, _)| canvas)
    }

    pub fn rasterize_with_stats<I>(&self, points: I) -> Result<(Thumbnail, RasterStats)>
    where
        I: IntoIterator<Item = ScreenPoint>,
    {
        let mut canvas = Thumbnail::new(self.canvas_size, self.background)?;
        let mut stats = RasterStats::default();

        for point in points {
            if self.draw(&mut canvas, point) {
                stats.drawn += 1;
            } else {
                stats.clipped += 1;
            }
        }

        Ok((canvas, stats))
    }
}

/// Rasterize with the default shading and background
pub fn rasterize<I>(points: I, canvas_size: u32) -> Result<Thumbnail>
where
    I: IntoIterator<Item = ScreenPoint>,
{
    Rasterizer::new(canvas_size).rasterize(points)
}
