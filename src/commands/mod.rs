pub mod init;
pub mod query;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::loader::{self, LoadReport};
use crate::symbol::{SymbolEntry, SymbolIndex};
use crate::Config;

/// Where commands read fragments from
pub struct IndexSource {
    pub directory: PathBuf,
    pub patterns: Vec<String>,
}

impl IndexSource {
    /// Use `dir` when given, otherwise the configured directory under `root`.
    pub fn resolve(config: &Config, root: &Path, dir: Option<&Path>) -> Self {
        let directory = match dir {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => root.join(dir),
            None => config.index_dir(root),
        };

        Self {
            directory,
            patterns: config.index.patterns.clone(),
        }
    }

    /// Load every fragment and build the merged index.
    pub async fn build_index(&self) -> Result<(SymbolIndex, LoadReport)> {
        let loaded = loader::load_directory(&self.directory, &self.patterns)
            .await
            .with_context(|| {
                format!("Failed to load fragments from {}", self.directory.display())
            })?;

        let (index, rejected) = SymbolIndex::load_with_report(&loaded.fragments);
        if !rejected.is_empty() {
            warn!("{} malformed entries were skipped", rejected.len());
        }

        Ok((index, loaded.report))
    }
}

/// Human-readable block for one entry: label line, then one line per target.
pub fn format_entry(entry: &SymbolEntry) -> String {
    let mut out = format!("{} [{}]", entry.label, entry.key);
    for target in &entry.targets {
        let descriptor = if target.descriptor.is_empty() {
            entry.label.as_str()
        } else {
            target.descriptor.as_str()
        };
        out.push_str(&format!("\n   {}  ->  {}", descriptor, target.href()));
    }
    out
}
