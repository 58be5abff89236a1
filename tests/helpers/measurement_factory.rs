use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Builds throwaway measurement files under a temp directory that lives as
/// long as the factory.
pub struct MeasurementFileFactory {
    dir: TempDir,
}

impl MeasurementFileFactory {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Writes `lines` to `name`, one per row, and returns the path.
    pub fn file_with_lines(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        let mut file = File::create(&path).expect("create file");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
        path
    }

    /// A path inside the temp directory that does not exist yet.
    pub fn missing_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for MeasurementFileFactory {
    fn default() -> Self {
        Self::new()
    }
}
