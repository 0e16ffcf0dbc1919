//! Reading fragment files from disk.
//!
//! This is the adapter between the documentation build output and the
//! in-memory [`SymbolIndex`](crate::symbol::SymbolIndex): it discovers
//! fragment files, parses them and hands back [`IndexFragment`] values in a
//! deterministic order. A file that cannot be read or parsed is dropped and
//! recorded in the [`LoadReport`]; the rest still load.

pub mod report;
pub mod searchdata;

use glob::Pattern;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::symbol::IndexFragment;

pub use report::{FileError, LoadReport, LoadStage};
pub use searchdata::{decode_entities, parse_search_data, ParseError};

/// Errors that can occur while loading fragment files.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The configured fragment directory does not exist.
    #[error("Fragment directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// A file pattern from the configuration is not a valid glob.
    #[error("Invalid fragment pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The file extension is neither `.js` nor `.json`.
    #[error("Unsupported fragment format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid search data: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid JSON fragment: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fragments read from disk plus the files that were skipped.
#[derive(Debug, Default)]
pub struct LoadedFragments {
    pub fragments: Vec<IndexFragment>,
    pub report: LoadReport,
}

/// Fragment name for a file: its stem, e.g. `functions_69`.
pub fn fragment_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse fragment file contents, choosing the format from the extension.
pub fn parse_fragment(path: &Path, content: &str) -> Result<IndexFragment, LoaderError> {
    let name = fragment_name(path);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("js") => Ok(parse_search_data(&name, content)?),
        Some("json") => {
            let mut fragment: IndexFragment = serde_json::from_str(content)?;
            if fragment.name.is_empty() {
                fragment.name = name;
            }
            Ok(fragment)
        }
        _ => Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Find fragment files under `dir` whose file name matches any pattern.
///
/// Paths are returned sorted so fragment order is stable between runs.
pub fn discover(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::MissingDirectory(dir.to_path_buf()));
    }

    let patterns = patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| LoaderError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable directory entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if patterns.iter().any(|p| p.matches(&file_name)) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    debug!("Discovered {} fragment files in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Read and parse the given files in order.
pub async fn load_files(paths: &[PathBuf]) -> LoadedFragments {
    let mut loaded = LoadedFragments::default();

    for path in paths {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) => {
                warn!("Failed to read fragment {}: {}", path.display(), err);
                loaded.report.record(path.clone(), err, LoadStage::FileRead);
                continue;
            }
        };

        match parse_fragment(path, &content) {
            Ok(fragment) => {
                debug!(
                    "Loaded fragment '{}' with {} entries",
                    fragment.name,
                    fragment.entries.len()
                );
                loaded.report.record_loaded();
                loaded.fragments.push(fragment);
            }
            Err(err) => {
                warn!("Failed to parse fragment {}: {}", path.display(), err);
                loaded.report.record(path.clone(), err, LoadStage::Parse);
            }
        }
    }

    loaded
}

/// Discover and load every fragment file under `dir`.
pub async fn load_directory(dir: &Path, patterns: &[String]) -> Result<LoadedFragments, LoaderError> {
    let paths = discover(dir, patterns)?;
    let loaded = load_files(&paths).await;

    info!(
        "Loaded {} fragments from {} ({} skipped)",
        loaded.fragments.len(),
        dir.display(),
        loaded.report.error_count()
    );

    Ok(loaded)
}
