//! Thumbnail derivation: decode, stretch to a fixed canvas, re-encode in the
//! attachment's own format.

use courier_core::constants::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

/// Produces fixed-size thumbnails.
///
/// Resizing ignores the aspect ratio: every thumbnail is exactly `width`×`height`.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailGenerator {
    width: u32,
    height: u32,
}

impl Default for ThumbnailGenerator {
    fn default() -> Self {
        Self::new(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
    }
}

impl ThumbnailGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Output format for an extension such as `.png` or `.JPG`.
    ///
    /// Extensions without an enabled encoder (`.im`, `.pcx`) are written as PNG.
    pub fn format_for_extension(extension: &str) -> ImageFormat {
        ImageFormat::from_extension(extension.trim_start_matches('.'))
            .filter(|format| format.writing_enabled())
            .unwrap_or(ImageFormat::Png)
    }

    /// Select resampling filter based on the downscale ratio
    fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Stretch `img` to the configured canvas.
    pub fn resize(&self, img: &DynamicImage) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, self.width, self.height);
        img.resize_exact(self.width, self.height, filter)
    }

    /// Decode `data` (format sniffed from the content), resize it and encode the result
    /// in the format named by `extension`.
    ///
    /// CPU-bound; call from `spawn_blocking` in async contexts.
    pub fn generate(&self, data: &[u8], extension: &str) -> Result<Vec<u8>, ThumbnailError> {
        let format = Self::format_for_extension(extension);
        let img = image::load_from_memory(data).map_err(ThumbnailError::Decode)?;

        let resized = self.resize(&img);
        // JPEG has no alpha channel; every other target takes RGBA8.
        let encodable = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
            _ => DynamicImage::ImageRgba8(resized.to_rgba8()),
        };

        let mut buffer = Vec::new();
        encodable
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(ThumbnailError::Encode)?;

        Ok(buffer)
    }
}
