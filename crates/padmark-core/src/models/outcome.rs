use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Machine code for files a cancelled batch never started
pub const CANCELLED_CODE: &str = "CANCELLED";

/// One file a batch failed to process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub file: String,
    pub error: String,
    pub code: String,
}

impl FileError {
    pub fn new(file: impl Into<String>, err: &PipelineError) -> Self {
        Self {
            file: file.into(),
            error: err.to_string(),
            code: err.error_code().to_string(),
        }
    }

    pub fn cancelled(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            error: "Batch cancelled before this file was processed".to_string(),
            code: CANCELLED_CODE.to_string(),
        }
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub success: bool,
    pub processed: usize,
    pub total: usize,
    pub errors: Vec<FileError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
}

impl BatchOutcome {
    /// Outcome for an input directory with nothing eligible in it
    pub fn empty() -> Self {
        Self {
            success: true,
            processed: 0,
            total: 0,
            errors: Vec::new(),
            message: Some("No images found to process".to_string()),
            cancelled: false,
        }
    }

    /// Files that did not end up written
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// Result of rendering one sample image without touching the output folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutcome {
    pub success: bool,
    /// `data:image/png;base64,...` payload
    pub preview: String,
    pub filename: String,
}

/// Structured failure handed to a UI layer instead of a process exit code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl From<&PipelineError> for ErrorResponse {
    fn from(err: &PipelineError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            code: err.error_code().to_string(),
        }
    }
}
