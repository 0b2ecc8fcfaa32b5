use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

/// 8-bit CPU image with 1 to 4 interleaved channels.
///
/// Pixels are addressed through byte handles: `pixel_handle(x, y)` returns the
/// offset of the pixel's first channel, and channel `c` lives at `handle + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image2D {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Image2D {
    /// Decodes an image file, keeping its channel count.
    ///
    /// Formats with more than 8 bits per channel are converted to RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?;

        let image = Self::from_dynamic(decoded);
        log::debug!(
            "loaded {} ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        Ok(image)
    }

    /// Zero-filled image. `channels` is clamped to `1..=4`.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        let channels = channels.clamp(1, 4);
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels as usize],
        }
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, data) = match image {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            other => (4, other.into_rgba8().into_raw()),
        };
        Self { width, height, channels, data }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel_handle(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
    }

    pub fn read_pixel(&self, handle: usize) -> Option<u8> {
        self.data.get(handle).copied()
    }

    /// Writes one channel byte. `false` if `handle` is out of range.
    pub fn write_pixel(&mut self, handle: usize, value: u8) -> bool {
        match self.data.get_mut(handle) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }

    /// Writes every channel of pixel `(x, y)` from `rgba`, truncated to the
    /// image's channel count.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        let Some(handle) = self.pixel_handle(x, y) else {
            return false;
        };
        let n = self.channels as usize;
        self.data[handle..handle + n].copy_from_slice(&rgba[..n]);
        true
    }

    /// Tightly packed RGBA8 copy for GPU upload.
    ///
    /// Gray sources replicate into RGB; missing alpha becomes opaque.
    pub fn to_rgba8(&self) -> Result<RgbaImage> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        let dynamic = match self.channels {
            1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(w, h, data).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        };
        dynamic
            .map(DynamicImage::into_rgba8)
            .with_context(|| format!("image buffer does not match {w}x{h}x{}", self.channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_zeroed_with_clamped_channels() {
        let img = Image2D::blank(3, 2, 9);
        assert_eq!(img.channels(), 4);
        assert_eq!(img.data().len(), 3 * 2 * 4);
        assert!(img.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn pixel_handle_is_row_major_byte_offset() {
        let img = Image2D::blank(4, 3, 3);
        assert_eq!(img.pixel_handle(0, 0), Some(0));
        assert_eq!(img.pixel_handle(1, 0), Some(3));
        assert_eq!(img.pixel_handle(2, 1), Some((4 + 2) * 3));
        assert_eq!(img.pixel_handle(4, 0), None);
        assert_eq!(img.pixel_handle(0, 3), None);
    }

    #[test]
    fn write_then_read_channel() {
        let mut img = Image2D::blank(2, 2, 3);
        let h = img.pixel_handle(1, 1).unwrap();
        assert!(img.write_pixel(h + 2, 200));
        assert_eq!(img.read_pixel(h + 2), Some(200));
        assert!(!img.write_pixel(img.data().len(), 1));
        assert_eq!(img.read_pixel(img.data().len()), None);
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let mut img = Image2D::blank(1, 1, 3);
        img.put_pixel(0, 0, [10, 20, 30, 0]);
        let rgba = img.to_rgba8().unwrap();
        assert_eq!(rgba.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn gray_alpha_replicates_luma() {
        let mut img = Image2D::blank(1, 1, 2);
        img.put_pixel(0, 0, [90, 128, 0, 0]);
        let rgba = img.to_rgba8().unwrap();
        assert_eq!(rgba.get_pixel(0, 0).0, [90, 90, 90, 128]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Image2D::load("does/not/exist.png").is_err());
    }
}
