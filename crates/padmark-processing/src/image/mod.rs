//! Image operations
//!
//! - Square canvas padding (canvas)
//! - Filtered resizing (resize)
//! - Screen-blend logo compositing (watermark)
//! - The full per-image sequence (transformer)

pub mod canvas;
pub mod resize;
pub mod transformer;
pub mod watermark;

pub use canvas::{centering_offset, pad_to_square, CANVAS_BACKGROUND};
pub use resize::ImageResize;
pub use transformer::{ImageTransformer, TransformParams};
pub use watermark::{
    logo_target_size, screen_blend_pixel, watermark_position, Watermark, WatermarkConfig,
};
