//! Preview driver - renders one sample image in memory
//!
//! Uses the same transform as a batch but never touches the output directory, and any
//! failure aborts the preview.

use base64::Engine;
use bytes::Bytes;
use image::ImageFormat;

use padmark_core::{BatchConfig, PipelineError, PreviewOutcome};

use crate::image::{ImageTransformer, TransformParams};
use crate::listing::{is_preview_image, list_entries};
use crate::preflight::{check_input_dir, read_logo};

/// A rendered preview before encoding for transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub filename: String,
    /// PNG-encoded result
    pub png: Bytes,
}

impl PreviewImage {
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Render the first recognised image of the input directory as PNG.
#[tracing::instrument(
    skip(config),
    fields(
        input = %config.input_path.display(),
        logo = %config.watermark_logo_file.display()
    )
)]
pub async fn render_preview(config: &BatchConfig) -> Result<PreviewImage, PipelineError> {
    check_input_dir(&config.input_path).await?;
    let logo = read_logo(&config.watermark_logo_file).await?;

    let entry = list_entries(&config.input_path, config.listing_order)
        .await?
        .into_iter()
        .find(|entry| is_preview_image(&entry.name))
        .ok_or_else(|| PipelineError::NoImagesFound(config.input_path.clone()))?;

    tracing::debug!(file = %entry.name, "Selected preview image");

    let source = tokio::fs::read(&entry.path)
        .await
        .map_err(|source| PipelineError::Read {
            file: entry.name.clone(),
            source,
        })?;

    let params = TransformParams::from(config);
    let name = entry.name.clone();
    let png = tokio::task::spawn_blocking(move || {
        ImageTransformer::transform(&name, &source, &logo, &params, ImageFormat::Png)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to spawn blocking task");
        PipelineError::Internal(e.to_string())
    })??;

    Ok(PreviewImage {
        filename: entry.name,
        png,
    })
}

/// Render a preview and package it as a `data:` URL.
pub async fn generate_preview(config: &BatchConfig) -> Result<PreviewOutcome, PipelineError> {
    let preview = render_preview(config).await?;
    Ok(PreviewOutcome {
        success: true,
        preview: preview.data_url(),
        filename: preview.filename,
    })
}
