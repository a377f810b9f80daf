use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Opaque white, the colour of a fresh canvas
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255u8, 255u8, 255u8, 255u8]);

/// Top-left position that centers a `width x height` image on a square canvas.
///
/// Truncating division; negative when the image is larger than the canvas.
pub fn centering_offset(canvas_size: u32, width: u32, height: u32) -> (i64, i64) {
    let canvas = i64::from(canvas_size);
    (
        (canvas - i64::from(width)) / 2,
        (canvas - i64::from(height)) / 2,
    )
}

/// Place `img` centered on a white `canvas_size` square. Oversized images are cropped.
pub fn pad_to_square(img: &DynamicImage, canvas_size: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let (x_offset, y_offset) = centering_offset(canvas_size, width, height);

    let mut canvas = RgbaImage::from_pixel(canvas_size, canvas_size, CANVAS_BACKGROUND);
    imageops::overlay(&mut canvas, img, x_offset, y_offset);
    canvas
}
