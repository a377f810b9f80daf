//! Configuration module
//!
//! [`RuntimeConfig`] holds process-level knobs read from the environment. [`BatchConfig`] is
//! the validated, immutable configuration for one batch or preview run; it is built from a
//! raw [`Settings`] document in a single merge step that applies every default.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CANVAS_SIZE, DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_SIZE, DEFAULT_SETTINGS_FILE,
    DEFAULT_WATERMARK_OPACITY,
};
use crate::error::PipelineError;
use crate::models::{ListingOrder, NumericValue, Settings};

/// Process-level configuration
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub settings_path: PathBuf,
    pub max_concurrency: usize,
    pub log_filter: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = RuntimeConfig {
            settings_path: env::var("PADMARK_SETTINGS")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE)),
            max_concurrency: env::var("PADMARK_MAX_CONCURRENCY")
                .unwrap_or_else(|_| DEFAULT_MAX_CONCURRENCY.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_CONCURRENCY),
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_concurrency == 0 {
            return Err(anyhow::anyhow!(
                "PADMARK_MAX_CONCURRENCY must be at least 1"
            ));
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            log_filter: "info".to_string(),
        }
    }
}

/// Configuration for one batch or preview run
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub watermark_logo_file: PathBuf,
    pub canvas_size: u32,
    pub output_size: u32,
    /// Not range-checked; the blend clamps whatever comes out.
    pub watermark_opacity: f32,
    /// Target logo width, `None` keeps the logo's own width
    pub watermark_width: Option<u32>,
    pub listing_order: ListingOrder,
    pub max_concurrency: usize,
}

impl BatchConfig {
    /// Config with every tunable at its default
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        watermark_logo_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            watermark_logo_file: watermark_logo_file.into(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            output_size: DEFAULT_OUTPUT_SIZE,
            watermark_opacity: DEFAULT_WATERMARK_OPACITY,
            watermark_width: None,
            listing_order: ListingOrder::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Merge a raw settings document with the defaults.
    ///
    /// Flat fields win over the nested `images`/`watermark` sections. Missing paths become
    /// empty paths and fail the existence checks later, when a run starts.
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        let path = |value: &Option<String>| PathBuf::from(value.as_deref().unwrap_or_default());

        let canvas_size = match settings.canvas_size_value() {
            Some(value) => parse_positive("canvasSize", value)?,
            None => DEFAULT_CANVAS_SIZE,
        };
        let output_size = match settings.output_size_value() {
            Some(value) => parse_positive("outputSize", value)?,
            None => DEFAULT_OUTPUT_SIZE,
        };
        let watermark_opacity = match settings.opacity_value() {
            Some(value) => value.as_float().ok_or_else(|| {
                PipelineError::InvalidConfig(format!(
                    "watermark opacity must be a number, got {}",
                    value
                ))
            })?,
            None => DEFAULT_WATERMARK_OPACITY,
        };
        let watermark_width = settings
            .logo_width_value()
            .map(|value| parse_positive("watermarkWidth", value))
            .transpose()?;
        let max_concurrency = match settings.max_concurrency.as_ref() {
            Some(value) => parse_positive("maxConcurrency", value)? as usize,
            None => DEFAULT_MAX_CONCURRENCY,
        };

        Ok(Self {
            input_path: path(&settings.input_path),
            output_path: path(&settings.output_path),
            watermark_logo_file: path(&settings.watermark_logo_file),
            canvas_size,
            output_size,
            watermark_opacity,
            watermark_width,
            listing_order: settings.listing_order.unwrap_or_default(),
            max_concurrency,
        })
    }
}

fn parse_positive(field: &str, value: &NumericValue) -> Result<u32, PipelineError> {
    value
        .as_integer()
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            PipelineError::InvalidConfig(format!(
                "{} must be a positive integer, got {}",
                field, value
            ))
        })
}
