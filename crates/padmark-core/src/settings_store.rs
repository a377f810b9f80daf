//! File-backed settings persistence.
//!
//! Every save first copies the current file to a `.backup` sibling; every load falls back
//! to that sibling when the primary file is missing or unparsable. A load never fails: when
//! neither file yields settings the caller gets `None` and runs on defaults.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::BACKUP_SUFFIX;
use crate::error::SettingsError;
use crate::models::Settings;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `settings.json` -> `settings.json.backup`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    pub fn load(&self) -> Option<Settings> {
        match read_settings(&self.path) {
            Ok(settings) => return Some(settings),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Primary settings unavailable");
            }
        }

        let backup = self.backup_path();
        if !backup.exists() {
            return None;
        }
        match read_settings(&backup) {
            Ok(settings) => {
                tracing::info!(path = %backup.display(), "Loaded settings from backup file");
                Some(settings)
            }
            Err(e) => {
                tracing::warn!(path = %backup.display(), error = %e, "Failed to load from backup");
                None
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if !self.is_writable() {
            return Err(SettingsError::NotWritable(self.path.clone()));
        }

        self.create_backup();

        let json = settings.to_json_pretty()?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    fn is_writable(&self) -> bool {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::metadata(&dir)
            .map(|meta| meta.is_dir() && !meta.permissions().readonly())
            .unwrap_or(false)
    }

    fn create_backup(&self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = fs::copy(&self.path, self.backup_path()) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to create backup");
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let data = fs::read_to_string(path)?;
    Ok(Settings::from_json(&data)?)
}
