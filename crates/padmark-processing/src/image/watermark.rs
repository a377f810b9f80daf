use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use padmark_core::constants::WATERMARK_MARGIN;

use crate::image::resize::ImageResize;

/// Watermark configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkConfig {
    /// Weight of the logo layer; the base layer is always fully present
    pub opacity: f32,
    /// Target logo width, height follows the aspect ratio. `None` keeps the native width.
    pub width: Option<u32>,
}

/// Top-left corner of the logo: `WATERMARK_MARGIN` pixels in from the bottom-right.
///
/// Negative when the logo does not fit; clipping happens during compositing.
pub fn watermark_position(
    img_width: u32,
    img_height: u32,
    logo_width: u32,
    logo_height: u32,
) -> (i64, i64) {
    (
        i64::from(img_width) - i64::from(logo_width) - WATERMARK_MARGIN,
        i64::from(img_height) - i64::from(logo_height) - WATERMARK_MARGIN,
    )
}

/// Logo dimensions after applying the configured width; `None` keeps the native size.
///
/// Returns `None` when the logo has no pixels.
pub fn logo_target_size(
    logo_width: u32,
    logo_height: u32,
    width: Option<u32>,
) -> Option<(u32, u32)> {
    ImageResize::auto_height(logo_width, logo_height, width.unwrap_or(logo_width))
}

/// Screen-blend one logo pixel over one base pixel.
///
/// Works on normalized channels with straight alpha. The logo alpha is scaled by `opacity`
/// first, so an opacity of 0 returns `dst` unchanged.
pub fn screen_blend_pixel(src: Rgba<u8>, dst: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let src_a = (f32::from(src[3]) / 255.0 * opacity).clamp(0.0, 1.0);
    if src_a == 0.0 {
        return dst;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let alpha = dst_a + src_a - dst_a * src_a;
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f32::from(src[c]) / 255.0;
        let d = f32::from(dst[c]) / 255.0;
        let value = (s * src_a + d * dst_a - s * src_a * d * dst_a) / alpha;
        out[c] = to_channel(value);
    }
    out[3] = to_channel(alpha);
    Rgba(out)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

pub struct Watermark;

impl Watermark {
    /// Size the logo per `config` and screen-blend it into the bottom-right of `img`.
    ///
    /// Fails only when the logo has no pixels to place.
    pub fn apply(
        img: &mut RgbaImage,
        logo: &DynamicImage,
        config: &WatermarkConfig,
    ) -> Result<(), String> {
        let (wm_width, wm_height) = logo.dimensions();
        let (target_wm_width, target_wm_height) =
            logo_target_size(wm_width, wm_height, config.width).ok_or_else(|| {
                format!(
                    "watermark logo has unusable dimensions {}x{}",
                    wm_width, wm_height
                )
            })?;

        let logo = ImageResize::resize_exact(&logo.to_rgba8(), target_wm_width, target_wm_height);

        let (img_width, img_height) = img.dimensions();
        let (x, y) = watermark_position(img_width, img_height, target_wm_width, target_wm_height);

        tracing::debug!(
            x = x,
            y = y,
            logo_width = target_wm_width,
            logo_height = target_wm_height,
            opacity = config.opacity,
            "Compositing watermark"
        );

        Self::screen(img, &logo, x, y, config.opacity);
        Ok(())
    }

    /// Screen-blend `logo` onto `img` at `(x, y)`, skipping pixels outside `img`.
    pub fn screen(img: &mut RgbaImage, logo: &RgbaImage, x: i64, y: i64, opacity: f32) {
        let (img_width, img_height) = img.dimensions();
        for (lx, ly, src) in logo.enumerate_pixels() {
            let dx = x + i64::from(lx);
            let dy = y + i64::from(ly);
            if dx < 0 || dy < 0 || dx >= i64::from(img_width) || dy >= i64::from(img_height) {
                continue;
            }
            let (dx, dy) = (dx as u32, dy as u32);
            let blended = screen_blend_pixel(*src, *img.get_pixel(dx, dy), opacity);
            img.put_pixel(dx, dy, blended);
        }
    }
}
