//! Padmark Core Library
//!
//! This crate provides the domain models, error types, configuration and settings
//! persistence shared by the image pipeline and its command-line front end.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod settings_store;

// Re-export commonly used types
pub use config::{BatchConfig, RuntimeConfig};
pub use error::{LogLevel, PipelineError, SettingsError};
pub use models::{
    BatchOutcome, ErrorResponse, FileError, ListingOrder, NumericValue, PreviewOutcome, Settings,
};
pub use settings_store::SettingsStore;
