//! Output image and image sinks

use cloudthumb_core::{Error, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Alpha declaration handed to hosts along with the pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaType {
    /// No alpha channel; every pixel is fully opaque
    Opaque,
}

/// A square RGB thumbnail
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pixels: RgbImage,
    background: Rgb<u8>,
}

impl Thumbnail {
    /// Allocate a `size x size` canvas filled with `background`.
    ///
    /// # Errors
    /// [`Error::InvalidCanvasSize`] for a zero size and [`Error::Resource`]
    /// when the pixel buffer cannot be allocated.
    pub fn new(size: u32, background: Rgb<u8>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidCanvasSize(size));
        }

        let len = (size as usize)
            .checked_mul(size as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| Error::Resource(format!("{size}x{size} canvas overflows memory")))?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|e| Error::Resource(format!("cannot allocate {size}x{size} canvas: {e}")))?;
        for _ in 0..(len / 3) {
            buffer.extend_from_slice(&background.0);
        }

        let pixels = RgbImage::from_raw(size, size, buffer)
            .ok_or_else(|| Error::Resource(format!("pixel buffer does not fit {size}x{size}")))?;

        Ok(Self { pixels, background })
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    pub fn alpha_type(&self) -> AlphaType {
        AlphaType::Opaque
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.contains(x, y).then(|| *self.pixels.get_pixel(x, y))
    }

    /// Set a pixel given signed coordinates. Returns `false` and leaves the
    /// canvas untouched when the coordinates fall outside it.
    pub fn put_pixel_checked(&mut self, x: i32, y: i32, color: Rgb<u8>) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return false;
        };
        if !self.contains(x, y) {
            return false;
        }
        self.pixels.put_pixel(x, y, color);
        true
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.pixels.width() && y < self.pixels.height()
    }

    /// Number of pixels that differ from the background.
    ///
    /// A point shaded in exactly the background color is not counted; use
    /// [`RasterStats`](crate::RasterStats) for the number of points drawn.
    pub fn count_non_background_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| **p != self.background).count()
    }

    /// Row-major RGB8 bytes
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Consumer of finished thumbnails, such as an encoder or a platform
/// bitmap wrapper.
pub trait ImageSink {
    type Output;

    /// Take a fully rasterized thumbnail; `background` is the color hosts
    /// should treat as empty space.
    fn accept(&mut self, thumbnail: &Thumbnail, background: Rgb<u8>) -> Result<Self::Output>;
}

/// Encodes thumbnails as PNG bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct PngSink;

impl ImageSink for PngSink {
    type Output = Vec<u8>;

    fn accept(&mut self, thumbnail: &Thumbnail, _background: Rgb<u8>) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                thumbnail.as_raw(),
                thumbnail.size(),
                thumbnail.size(),
                ColorType::Rgb8,
            )
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

/// Writes thumbnails to a file, choosing the format from its extension
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    type Output = PathBuf;

    fn accept(&mut self, thumbnail: &Thumbnail, _background: Rgb<u8>) -> Result<PathBuf> {
        thumbnail
            .as_rgb_image()
            .save(&self.path)
            .map_err(|e| Error::Encode(format!("{}: {e}", self.path.display())))?;
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_background() {
        let thumb = Thumbnail::new(8, Rgb([1, 2, 3])).unwrap();
        assert_eq!(thumb.size(), 8);
        assert_eq!(thumb.as_raw().len(), 8 * 8 * 3);
        assert!(thumb.as_rgb_image().pixels().all(|p| *p == Rgb([1, 2, 3])));
        assert_eq!(thumb.count_non_background_pixels(), 0);
        assert_eq!(thumb.alpha_type(), AlphaType::Opaque);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            Thumbnail::new(0, Rgb([0, 0, 0])),
            Err(Error::InvalidCanvasSize(0))
        ));
    }

    #[test]
    fn test_put_pixel_checked_bounds() {
        let mut thumb = Thumbnail::new(4, Rgb([0, 0, 0])).unwrap();
        let red = Rgb([255, 0, 0]);
        assert!(thumb.put_pixel_checked(0, 0, red));
        assert!(thumb.put_pixel_checked(3, 3, red));
        assert!(!thumb.put_pixel_checked(-1, 0, red));
        assert!(!thumb.put_pixel_checked(4, 0, red));
        assert!(!thumb.put_pixel_checked(0, 4, red));
        assert_eq!(thumb.count_non_background_pixels(), 2);
        assert_eq!(thumb.pixel(3, 3), Some(red));
        assert_eq!(thumb.pixel(4, 4), None);
    }

    #[test]
    fn test_png_sink_produces_png() {
        let mut thumb = Thumbnail::new(16, Rgb([0, 0, 0])).unwrap();
        thumb.put_pixel_checked(5, 7, Rgb([126, 40, 40]));

        let bytes = PngSink.accept(&thumb, thumb.background()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(*decoded.get_pixel(5, 7), Rgb([126, 40, 40]));
    }

    #[test]
    fn test_file_sink_writes_image() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("thumb.png");
        let thumb = Thumbnail::new(4, Rgb([9, 9, 9])).unwrap();

        let written = FileSink::new(&path).accept(&thumb, thumb.background()).unwrap();
        assert_eq!(written, path);
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(*reloaded.get_pixel(0, 0), Rgb([9, 9, 9]));
    }

    #[test]
    fn test_file_sink_unknown_extension_fails() {
        let dir = assert_fs::TempDir::new().unwrap();
        let thumb = Thumbnail::new(4, Rgb([0, 0, 0])).unwrap();
        let result = FileSink::new(dir.path().join("thumb.unknown")).accept(&thumb, thumb.background());
        assert!(matches!(result, Err(Error::Encode(_))));
    }
}
