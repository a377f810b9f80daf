//! Error types module
//!
//! All pipeline failures are unified under [`PipelineError`]. Variants fall into two
//! groups: preconditions, which abort a whole batch or preview before any file is read, and
//! per-file failures, which a batch records and moves past but a preview propagates.

use std::io;
use std::path::PathBuf;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing folder picked by the user
    Debug,
    /// Warning level - for recoverable per-file failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Logo file not found: {}", .0.display())]
    LogoNotFound(PathBuf),

    #[error("No image files found in {}", .0.display())]
    NoImagesFound(PathBuf),

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list directory {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to composite watermark onto {file}: {reason}")]
    Composite { file: String, reason: String },

    #[error("Failed to encode {file}: {source}")]
    Encode {
        file: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Machine-readable error code (e.g., "DECODE_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::InputNotFound(_) => "INPUT_NOT_FOUND",
            PipelineError::LogoNotFound(_) => "LOGO_NOT_FOUND",
            PipelineError::NoImagesFound(_) => "NO_IMAGES_FOUND",
            PipelineError::OutputDir { .. } => "OUTPUT_DIR_ERROR",
            PipelineError::Listing { .. } => "LISTING_ERROR",
            PipelineError::InvalidConfig(_) => "INVALID_CONFIG",
            PipelineError::Read { .. } => "READ_ERROR",
            PipelineError::Decode { .. } => "DECODE_ERROR",
            PipelineError::Composite { .. } => "COMPOSITE_ERROR",
            PipelineError::Encode { .. } => "ENCODE_ERROR",
            PipelineError::Write { .. } => "WRITE_ERROR",
            PipelineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error stops the whole operation before any file is processed
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PipelineError::InputNotFound(_)
                | PipelineError::LogoNotFound(_)
                | PipelineError::NoImagesFound(_)
                | PipelineError::OutputDir { .. }
                | PipelineError::Listing { .. }
                | PipelineError::InvalidConfig(_)
        )
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            PipelineError::InputNotFound(_)
            | PipelineError::LogoNotFound(_)
            | PipelineError::NoImagesFound(_)
            | PipelineError::InvalidConfig(_) => LogLevel::Debug,
            PipelineError::Read { .. }
            | PipelineError::Decode { .. }
            | PipelineError::Composite { .. }
            | PipelineError::Encode { .. }
            | PipelineError::Write { .. } => LogLevel::Warn,
            PipelineError::OutputDir { .. }
            | PipelineError::Listing { .. }
            | PipelineError::Internal(_) => LogLevel::Error,
        }
    }
}

/// Failures of the file-backed settings store
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings path is not writable: {}", .0.display())]
    NotWritable(PathBuf),

    #[error("Settings IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
