//! Application-wide constants.

/// Side length of the intermediate square canvas when none is configured.
pub const DEFAULT_CANVAS_SIZE: u32 = 1000;

/// Side length of the final output image when none is configured.
pub const DEFAULT_OUTPUT_SIZE: u32 = 800;

/// Logo blend weight when none is configured.
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.5;

/// Default number of files transformed at once in a batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Distance in pixels between the logo and the bottom-right corner.
pub const WATERMARK_MARGIN: i64 = 10;

/// Suffix appended to a settings file name to form its backup sibling.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Settings file used when neither the CLI nor the environment name one.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Extensions the preview driver recognises as images (lowercase).
pub const PREVIEW_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Extensions of desktop metadata files that never enter a batch (lowercase).
pub const SIDECAR_EXTENSIONS: &[&str] = &["ini"];

/// Exact file names of desktop metadata files that never enter a batch.
pub const SIDECAR_FILE_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];
