//! Symbol indexing and search module
//!
//! This module merges documentation search-index fragments into a single
//! in-memory index and answers prefix and exact-key lookups over it. It
//! performs no I/O; reading fragment files is the job of [`crate::loader`].

pub mod error;
pub mod handle;
pub mod index;
pub mod normalize;
pub mod types;

pub use error::{MalformedReason, SymbolError};
pub use handle::IndexHandle;
pub use index::{IndexStats, SymbolIndex};
pub use normalize::{fold_key, normalize_raw_key};
pub use types::{IndexFragment, Locator, SymbolEntry};
