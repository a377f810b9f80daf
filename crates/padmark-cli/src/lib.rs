//! Shared pieces of the `padmark` binary: argument overrides, output and tracing setup.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use padmark_core::{
    BatchConfig, ErrorResponse, ListingOrder, NumericValue, PipelineError, RuntimeConfig,
    Settings, SettingsStore,
};

/// Command-line overrides layered over the settings file
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (defaults to PADMARK_SETTINGS or settings.json)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Folder of source images
    #[arg(long, value_name = "DIR")]
    pub input: Option<String>,

    /// Folder receiving the processed images
    #[arg(long, value_name = "DIR")]
    pub output: Option<String>,

    /// Watermark logo image
    #[arg(long, value_name = "FILE")]
    pub logo: Option<String>,

    /// Side of the white square canvas in pixels
    #[arg(long)]
    pub canvas_size: Option<u32>,

    /// Side of the final image in pixels
    #[arg(long)]
    pub output_size: Option<u32>,

    /// Watermark opacity, 0.0 to 1.0
    #[arg(long)]
    pub opacity: Option<f32>,

    /// Watermark logo width in pixels (height follows the aspect ratio)
    #[arg(long)]
    pub logo_width: Option<u32>,

    /// Visit input files in file name order
    #[arg(long)]
    pub sorted: bool,

    /// Files processed at the same time
    #[arg(long)]
    pub jobs: Option<u32>,
}

impl SettingsArgs {
    /// Settings document holding only the values given on the command line
    pub fn to_settings(&self) -> Settings {
        Settings {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            watermark_logo_file: self.logo.clone(),
            canvas_size: self.canvas_size.map(NumericValue::from),
            output_size: self.output_size.map(NumericValue::from),
            watermark_opacity: self.opacity.map(NumericValue::from),
            watermark_width: self.logo_width.map(NumericValue::from),
            listing_order: self.sorted.then_some(ListingOrder::Lexicographic),
            max_concurrency: self.jobs.map(NumericValue::from),
            ..Settings::default()
        }
    }

    pub fn store(&self, runtime: &RuntimeConfig) -> SettingsStore {
        SettingsStore::new(
            self.settings
                .clone()
                .unwrap_or_else(|| runtime.settings_path.clone()),
        )
    }

    /// Saved settings with the command-line overrides on top
    pub fn merged_settings(&self, store: &SettingsStore) -> Settings {
        let saved = store.load().unwrap_or_else(|| {
            tracing::debug!(path = %store.path().display(), "No saved settings, using defaults");
            Settings::default()
        });
        saved.overlay(self.to_settings())
    }

    /// Run configuration: environment defaults, then the settings file, then the command line.
    pub fn batch_config(&self, runtime: &RuntimeConfig) -> Result<BatchConfig, PipelineError> {
        let store = self.store(runtime);
        let base = Settings {
            max_concurrency: u32::try_from(runtime.max_concurrency)
                .ok()
                .map(NumericValue::from),
            ..Settings::default()
        };
        BatchConfig::from_settings(&base.overlay(self.merged_settings(&store)))
    }
}

/// Structured failure for stdout. Pipeline errors keep their code.
pub fn error_response(err: &anyhow::Error) -> ErrorResponse {
    match err.downcast_ref::<PipelineError>() {
        Some(pipeline) => ErrorResponse::from(pipeline),
        None => ErrorResponse {
            success: false,
            error: format!("{:#}", err),
            code: "CLI_ERROR".to_string(),
        },
    }
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing on stderr; stdout carries JSON only.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn overrides_only_set_given_fields() {
        let args = SettingsArgs {
            input: Some("in".into()),
            opacity: Some(0.25),
            ..SettingsArgs::default()
        };
        let settings = args.to_settings();

        assert_eq!(settings.input_path.as_deref(), Some("in"));
        assert!(settings.output_path.is_none());
        assert!(settings.listing_order.is_none());
        assert!(settings.watermark_opacity.is_some());
    }

    #[test]
    fn command_line_wins_over_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"inputPath": "saved-in", "outputPath": "saved-out", "images": {"outputSize": "640"}}"#,
        )
        .unwrap();

        let args = SettingsArgs {
            settings: Some(path),
            input: Some("cli-in".into()),
            sorted: true,
            ..SettingsArgs::default()
        };
        let config = args.batch_config(&RuntimeConfig::default()).unwrap();

        assert_eq!(config.input_path, PathBuf::from("cli-in"));
        assert_eq!(config.output_path, PathBuf::from("saved-out"));
        assert_eq!(config.output_size, 640);
        assert_eq!(config.listing_order, ListingOrder::Lexicographic);
    }

    #[test]
    fn runtime_concurrency_is_the_fallback() {
        let dir = TempDir::new().unwrap();
        let runtime = RuntimeConfig {
            settings_path: dir.path().join("absent.json"),
            max_concurrency: 7,
            ..RuntimeConfig::default()
        };

        let config = SettingsArgs::default().batch_config(&runtime).unwrap();
        assert_eq!(config.max_concurrency, 7);

        let args = SettingsArgs {
            jobs: Some(2),
            ..SettingsArgs::default()
        };
        assert_eq!(args.batch_config(&runtime).unwrap().max_concurrency, 2);
    }

    #[test]
    fn error_response_keeps_pipeline_code() {
        let err = anyhow::Error::new(PipelineError::LogoNotFound(PathBuf::from("logo.png")));
        let response = error_response(&err);
        assert_eq!(response.code, "LOGO_NOT_FOUND");
        assert!(!response.success);

        let err = anyhow::anyhow!("boom");
        assert_eq!(error_response(&err).code, "CLI_ERROR");
    }
}
