//! Checks that run before any file of a batch or preview is touched

use std::path::Path;

use bytes::Bytes;
use padmark_core::PipelineError;

pub async fn check_input_dir(path: &Path) -> Result<(), PipelineError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(PipelineError::InputNotFound(path.to_path_buf())),
    }
}

/// Create the output directory and any missing parents. An existing directory is fine.
///
/// An empty path is rejected; joining onto it would write into the working directory.
pub async fn ensure_output_dir(path: &Path) -> Result<(), PipelineError> {
    if path.as_os_str().is_empty() {
        return Err(PipelineError::InvalidConfig(
            "output path is not set".to_string(),
        ));
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| PipelineError::OutputDir {
            path: path.to_path_buf(),
            source,
        })
}

pub async fn check_logo(path: &Path) -> Result<(), PipelineError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(PipelineError::LogoNotFound(path.to_path_buf())),
    }
}

/// Read the logo once; every file of the run shares these bytes.
pub async fn read_logo(path: &Path) -> Result<Bytes, PipelineError> {
    check_logo(path).await?;
    tokio::fs::read(path).await.map(Bytes::from).map_err(|e| {
        tracing::debug!(error = %e, path = %path.display(), "Failed to read logo");
        PipelineError::LogoNotFound(path.to_path_buf())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_input_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        assert!(check_input_dir(dir.path()).await.is_ok());

        let file = dir.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();
        let err = check_input_dir(&file).await.unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");

        let err = check_input_dir(Path::new("")).await.unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_output_dir_created_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_output_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // idempotent
        ensure_output_dir(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_output_path_rejected() {
        let err = ensure_output_dir(Path::new("")).await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_read_logo() {
        let dir = TempDir::new().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"logo-bytes").unwrap();

        assert_eq!(read_logo(&logo).await.unwrap(), Bytes::from_static(b"logo-bytes"));

        let err = read_logo(&dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, PipelineError::LogoNotFound(_)));
        let err = read_logo(dir.path()).await.unwrap_err();
        assert!(matches!(err, PipelineError::LogoNotFound(_)));
    }
}
