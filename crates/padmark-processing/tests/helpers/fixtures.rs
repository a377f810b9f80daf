use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

fn encode(img: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture");
    buffer
}

/// Solid-colour PNG
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(
        RgbaImage::from_pixel(width, height, Rgba([30, 90, 200, 255])),
        ImageFormat::Png,
    )
}

/// Gradient JPEG
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    encode(img, ImageFormat::Jpeg)
}

/// White logo on a transparent border
pub fn create_test_logo(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    encode(img, ImageFormat::Png)
}

/// Bytes with an image extension that no decoder accepts
pub fn create_corrupt_image() -> Vec<u8> {
    b"definitely not an image".to_vec()
}
