//! Input directory listing

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use padmark_core::constants::{PREVIEW_IMAGE_EXTENSIONS, SIDECAR_EXTENSIONS, SIDECAR_FILE_NAMES};
use padmark_core::{ListingOrder, PipelineError};

/// A regular file eligible for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Position in the listing after ordering
    pub index: usize,
    /// Display name, used as the key in error reports
    pub name: String,
    pub file_name: OsString,
    pub path: PathBuf,
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Desktop metadata files (`desktop.ini`, `.DS_Store`, ...) that never enter a batch
pub fn is_sidecar(name: &str) -> bool {
    if SIDECAR_FILE_NAMES.contains(&name) {
        return true;
    }
    extension_of(name).is_some_and(|ext| SIDECAR_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the preview driver treats this name as an image
pub fn is_preview_image(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| PREVIEW_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the regular, non-sidecar files of `dir` in the requested order.
///
/// Subdirectories and other non-files are skipped. Entries whose metadata cannot be read
/// (a dangling symlink, say) are listed.
pub async fn list_entries(
    dir: &Path,
    order: ListingOrder,
) -> Result<Vec<ListedEntry>, PipelineError> {
    let listing_error = |source| PipelineError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(listing_error)?;
    let mut files = Vec::new();

    while let Some(entry) = read_dir.next_entry().await.map_err(listing_error)? {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().to_string();

        if is_sidecar(&name) {
            tracing::debug!(file = %name, "Skipping sidecar file");
            continue;
        }

        let path = entry.path();
        // Follows symlinks, unlike DirEntry::file_type
        match tokio::fs::metadata(&path).await {
            Ok(meta) if !meta.is_file() => continue,
            Ok(_) => {}
            Err(e) => {
                // Listed anyway; the read reports it
                tracing::debug!(file = %name, error = %e, "Cannot stat entry");
            }
        }

        files.push((file_name, name, path));
    }

    if order == ListingOrder::Lexicographic {
        files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, (file_name, name, path))| ListedEntry {
            index,
            name,
            file_name,
            path,
        })
        .collect())
}
