use image::{imageops, imageops::FilterType, RgbaImage};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
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

    /// Scale a square canvas to `size x size`
    pub fn resize_square(canvas: &RgbaImage, size: u32) -> RgbaImage {
        Self::resize_exact(canvas, size, size)
    }

    /// Resize to exact dimensions; returns a copy when nothing changes
    pub fn resize_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        let (orig_width, orig_height) = img.dimensions();
        if (orig_width, orig_height) == (width, height) {
            return img.clone();
        }
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        imageops::resize(img, width, height, filter)
    }

    /// Dimensions for a resize to `target_width` with the height following the aspect ratio.
    ///
    /// Returns `None` for a zero-sized source.
    pub fn auto_height(orig_width: u32, orig_height: u32, target_width: u32) -> Option<(u32, u32)> {
        if orig_width == 0 || orig_height == 0 || target_width == 0 {
            return None;
        }
        if target_width == orig_width {
            return Some((orig_width, orig_height));
        }
        let aspect_ratio = orig_height as f64 / orig_width as f64;
        let height = (target_width as f64 * aspect_ratio).round() as u32;
        Some((target_width, height.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_select_filter_by_ratio() {
        assert_eq!(ImageResize::select_filter(1000, 1000, 800, 800), FilterType::Lanczos3);
        assert_eq!(ImageResize::select_filter(1000, 1000, 600, 600), FilterType::CatmullRom);
        assert_eq!(ImageResize::select_filter(1000, 1000, 200, 200), FilterType::Triangle);
        // Upscaling keeps the sharp filter
        assert_eq!(ImageResize::select_filter(100, 100, 800, 800), FilterType::Lanczos3);
    }

    #[test]
    fn test_resize_square_dimensions() {
        let canvas = RgbaImage::from_pixel(1000, 1000, Rgba([255, 255, 255, 255]));
        let resized = ImageResize::resize_square(&canvas, 80);
        assert_eq!(resized.dimensions(), (80, 80));
    }

    #[test]
    fn test_resize_uniform_colour_is_preserved() {
        let canvas = RgbaImage::from_pixel(50, 50, Rgba([10, 20, 30, 255]));
        let resized = ImageResize::resize_square(&canvas, 20);
        assert!(resized.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_auto_height() {
        assert_eq!(ImageResize::auto_height(100, 40, 100), Some((100, 40)));
        assert_eq!(ImageResize::auto_height(100, 40, 50), Some((50, 20)));
        assert_eq!(ImageResize::auto_height(300, 1, 10), Some((10, 1)));
        assert_eq!(ImageResize::auto_height(0, 40, 50), None);
    }
}
