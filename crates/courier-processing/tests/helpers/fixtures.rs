//! Test fixtures: small encoded images and their base64 forms.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// An RGBA PNG of the given dimensions.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let img = image::DynamicImage::ImageRgba8(img);
    let img = match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture");
    buffer
}

pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Split `encoded` into `parts` roughly equal chunks.
pub fn split_chunks(encoded: &str, parts: usize) -> Vec<String> {
    let size = encoded.len().div_ceil(parts).max(1);
    encoded
        .as_bytes()
        .chunks(size)
        .map(|chunk| String::from_utf8(chunk.to_vec()).unwrap())
        .collect()
}

pub fn data_uri(media_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, to_base64(data))
}
