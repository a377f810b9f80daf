//! Image transformer - runs the full pad, resize, watermark, encode sequence
//!
//! Each stage hands its result straight to the next:
//! 1. Decode the source
//! 2. Pad it onto a white square canvas
//! 3. Resize the canvas to the output size
//! 4. Decode and size the logo
//! 5. Screen-blend the logo into the bottom-right corner
//! 6. Encode

use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};

use padmark_core::{BatchConfig, PipelineError};

use crate::image::canvas::pad_to_square;
use crate::image::resize::ImageResize;
use crate::image::watermark::{Watermark, WatermarkConfig};

/// Numeric knobs of a single transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub canvas_size: u32,
    pub output_size: u32,
    pub opacity: f32,
    pub logo_width: Option<u32>,
}

impl From<&BatchConfig> for TransformParams {
    fn from(config: &BatchConfig) -> Self {
        Self {
            canvas_size: config.canvas_size,
            output_size: config.output_size,
            opacity: config.watermark_opacity,
            logo_width: config.watermark_width,
        }
    }
}

/// Main image transformer
pub struct ImageTransformer;

impl ImageTransformer {
    /// Transform encoded source bytes into encoded output bytes.
    ///
    /// `file` only labels errors. Neither input buffer is modified.
    pub fn transform(
        file: &str,
        source: &[u8],
        logo: &[u8],
        params: &TransformParams,
        format: ImageFormat,
    ) -> Result<Bytes, PipelineError> {
        let img = Self::decode(source).map_err(|source| PipelineError::Decode {
            file: file.to_string(),
            source,
        })?;

        let canvas = pad_to_square(&img, params.canvas_size);
        let mut output = ImageResize::resize_square(&canvas, params.output_size);

        let logo = Self::decode(logo).map_err(|e| PipelineError::Composite {
            file: file.to_string(),
            reason: format!("failed to decode watermark logo: {}", e),
        })?;
        let watermark = WatermarkConfig {
            opacity: params.opacity,
            width: params.logo_width,
        };
        Watermark::apply(&mut output, &logo, &watermark).map_err(|reason| {
            PipelineError::Composite {
                file: file.to_string(),
                reason,
            }
        })?;

        Self::encode(output, format).map_err(|source| PipelineError::Encode {
            file: file.to_string(),
            source,
        })
    }

    /// Decode with the format guessed from the content
    pub fn decode(data: &[u8]) -> Result<DynamicImage, image::ImageError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()
    }

    /// Encode, dropping the alpha channel for formats that cannot store it
    pub fn encode(img: RgbaImage, format: ImageFormat) -> Result<Bytes, image::ImageError> {
        let img = match format {
            ImageFormat::Jpeg => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8())
            }
            _ => DynamicImage::ImageRgba8(img),
        };

        let (width, height) = (img.width() as usize, img.height() as usize);
        let mut buffer = Vec::with_capacity(width * height * 3);
        img.write_to(&mut Cursor::new(&mut buffer), format)?;
        Ok(Bytes::from(buffer))
    }

    /// Output encoding for a file name; unknown extensions get PNG
    pub fn output_format_for(path: &Path) -> ImageFormat {
        ImageFormat::from_path(path).unwrap_or(ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    fn encode_png(img: RgbaImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn params(opacity: f32) -> TransformParams {
        TransformParams {
            canvas_size: 100,
            output_size: 50,
            opacity,
            logo_width: None,
        }
    }

    #[test]
    fn test_transform_output_dimensions() {
        let source = encode_png(RgbaImage::from_pixel(60, 30, Rgba([0, 0, 255, 255])));
        let logo = encode_png(RgbaImage::from_pixel(10, 4, Rgba([255, 255, 255, 255])));

        let out =
            ImageTransformer::transform("a.png", &source, &logo, &params(0.5), ImageFormat::Png)
                .unwrap();

        let decoded = ImageTransformer::decode(&out).unwrap();
        assert_eq!(decoded.dimensions(), (50, 50));
    }

    #[test]
    fn test_transform_does_not_touch_inputs() {
        let source = encode_png(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])));
        let logo = encode_png(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        let (source_copy, logo_copy) = (source.clone(), logo.clone());

        ImageTransformer::transform("a.png", &source, &logo, &params(1.0), ImageFormat::Png)
            .unwrap();

        assert_eq!(source, source_copy);
        assert_eq!(logo, logo_copy);
    }

    #[test]
    fn test_zero_opacity_matches_unwatermarked_resize() {
        let source_img = RgbaImage::from_fn(40, 20, |x, y| {
            Rgba([(x * 6) as u8, (y * 12) as u8, 128, 255])
        });
        let source = encode_png(source_img.clone());
        let logo = encode_png(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255])));

        let out =
            ImageTransformer::transform("a.png", &source, &logo, &params(0.0), ImageFormat::Png)
                .unwrap();
        let out = ImageTransformer::decode(&out).unwrap().to_rgba8();

        let canvas = pad_to_square(&DynamicImage::ImageRgba8(source_img), 100);
        let expected = ImageResize::resize_square(&canvas, 50);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_full_opacity_white_logo_whitens_corner() {
        let source = encode_png(RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255])));
        let logo = encode_png(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255])));
        let params = TransformParams {
            canvas_size: 100,
            output_size: 100,
            opacity: 1.0,
            logo_width: None,
        };

        let out = ImageTransformer::transform("a.png", &source, &logo, &params, ImageFormat::Png)
            .unwrap();
        let out = ImageTransformer::decode(&out).unwrap().to_rgba8();

        // Logo at (80, 80)..(90, 90)
        assert_eq!(*out.get_pixel(85, 85), Rgba([255, 255, 255, 255]));
        assert_eq!(*out.get_pixel(50, 50), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_undecodable_source_is_decode_error() {
        let logo = encode_png(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        let err = ImageTransformer::transform(
            "broken.jpg",
            b"not an image",
            &logo,
            &params(0.5),
            ImageFormat::Png,
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Decode { ref file, .. } if file == "broken.jpg"));
    }

    #[test]
    fn test_undecodable_logo_is_composite_error() {
        let source = encode_png(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let err = ImageTransformer::transform(
            "a.png",
            &source,
            b"garbage",
            &params(0.5),
            ImageFormat::Png,
        )
        .unwrap_err();

        assert_eq!(err.error_code(), "COMPOSITE_ERROR");
    }

    #[test]
    fn test_jpeg_output_drops_alpha() {
        let source = encode_png(RgbaImage::from_pixel(10, 10, Rgba([0, 128, 0, 255])));
        let logo = encode_png(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));

        let out =
            ImageTransformer::transform("a.jpg", &source, &logo, &params(0.5), ImageFormat::Jpeg)
                .unwrap();

        assert_eq!(&out[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_output_format_for() {
        assert_eq!(
            ImageTransformer::output_format_for(Path::new("a.JPG")),
            ImageFormat::Jpeg
        );
        assert_eq!(
            ImageTransformer::output_format_for(Path::new("b.png")),
            ImageFormat::Png
        );
        assert_eq!(
            ImageTransformer::output_format_for(Path::new("noext")),
            ImageFormat::Png
        );
    }
}
