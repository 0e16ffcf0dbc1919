//! Error collection and reporting for fragment loading

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Stage where loading a fragment file failed
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum LoadStage {
    FileRead,
    Parse,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStage::FileRead => write!(f, "File Read"),
            LoadStage::Parse => write!(f, "Parse"),
        }
    }
}

/// A fragment file that was dropped from the load
#[derive(Debug, Clone)]
pub struct FileError {
    pub path: PathBuf,
    pub error: String,
    pub stage: LoadStage,
}

/// Failures collected while loading a set of fragment files
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    errors: Vec<FileError>,
    loaded: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that could not be turned into a fragment
    pub fn record(&mut self, path: PathBuf, error: impl std::fmt::Display, stage: LoadStage) {
        self.errors.push(FileError {
            path,
            error: error.to_string(),
            stage,
        });
    }

    /// Count a file that loaded successfully
    pub fn record_loaded(&mut self) {
        self.loaded += 1;
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn errors(&self) -> &[FileError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Failures grouped by stage, in stage order
    pub fn by_stage(&self) -> BTreeMap<LoadStage, Vec<&FileError>> {
        let mut by_stage: BTreeMap<LoadStage, Vec<&FileError>> = BTreeMap::new();
        for error in &self.errors {
            by_stage.entry(error.stage).or_default().push(error);
        }
        by_stage
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            format!("Loaded {} fragment files", self.loaded)
        } else {
            format!(
                "Loaded {} fragment files, skipped {} with errors",
                self.loaded,
                self.errors.len()
            )
        }
    }

    /// Print a summary of the failures to stderr
    pub fn print_summary(&self) {
        if self.errors.is_empty() {
            return;
        }

        eprintln!("warning: {}", self.summary());

        for (stage, errors) in self.by_stage() {
            eprintln!("  {}: {} errors", stage, errors.len());

            // Show up to 5 examples per stage
            for error in errors.iter().take(5) {
                eprintln!("    - {}: {}", error.path.display(), error.error);
            }

            if errors.len() > 5 {
                eprintln!("    ... and {} more", errors.len() - 5);
            }
        }
    }
}
