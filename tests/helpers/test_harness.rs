use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary fragment directory for loader tests
pub struct TestHarness {
    pub temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Copy every fixture file whose name is listed into the harness directory
    pub fn with_fixtures(names: &[&str]) -> Result<Self> {
        let harness = Self::new()?;
        for name in names {
            std::fs::copy(super::test_utils::fixture_dir().join(name), harness.path().join(name))?;
        }
        Ok(harness)
    }

    pub fn create_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
