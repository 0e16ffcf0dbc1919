//! Errors raised by the symbol index.

use thiserror::Error;

/// Errors that can occur while building or querying a [`SymbolIndex`](super::SymbolIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// An entry in a fragment could not be used.
    #[error("Malformed entry '{key}' in fragment '{fragment}': {reason}")]
    MalformedFragment {
        fragment: String,
        key: String,
        reason: MalformedReason,
    },

    /// The query arguments were rejected.
    #[error("Invalid query: limit must not be negative (got {limit})")]
    InvalidQuery { limit: i64 },
}

/// Why an entry was rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    EmptyKey,
    NoTargets,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::EmptyKey => write!(f, "missing key"),
            MalformedReason::NoTargets => write!(f, "empty target list"),
        }
    }
}
