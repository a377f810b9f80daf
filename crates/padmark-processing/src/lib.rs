//! Padmark Processing Library
//!
//! This crate turns a directory of images into padded, resized and watermarked copies.
//! [`run_batch`] processes every file and reports per-file failures without stopping;
//! [`generate_preview`] renders one sample in memory.

pub mod batch;
pub mod image;
pub mod listing;
pub mod preflight;
pub mod preview;

// Re-export commonly used types
pub use batch::{run_batch, run_batch_with_cancel};
pub use crate::image::{ImageTransformer, TransformParams};
pub use listing::{is_preview_image, is_sidecar, list_entries, ListedEntry};
pub use preview::{generate_preview, render_preview, PreviewImage};
