#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};

use padmark_core::{BatchConfig, ListingOrder};
use tempfile::TempDir;

/// Temporary input/output/logo layout for one test
pub struct TestWorkspace {
    pub input: PathBuf,
    pub output: PathBuf,
    pub logo: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestWorkspace {
    /// Input directory and logo exist; the output directory does not yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("input");
        let output = temp_dir.path().join("output");
        let logo = temp_dir.path().join("logo.png");

        std::fs::create_dir(&input).expect("Failed to create input dir");
        std::fs::write(&logo, fixtures::create_test_logo(20, 8))
            .expect("Failed to write logo");

        Self {
            input,
            output,
            logo,
            _temp_dir: temp_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    pub fn add_input(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.input.join(name);
        std::fs::write(&path, data).expect("Failed to write input file");
        path
    }

    /// Small sizes keep the resize cheap
    pub fn config(&self) -> BatchConfig {
        BatchConfig {
            canvas_size: 120,
            output_size: 100,
            ..BatchConfig::new(&self.input, &self.output, &self.logo)
        }
    }

    pub fn sorted_config(&self) -> BatchConfig {
        BatchConfig {
            listing_order: ListingOrder::Lexicographic,
            ..self.config()
        }
    }

    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.output) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}
