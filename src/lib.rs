pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;
pub mod symbol;

pub use config::Config;
pub use loader::{load_directory, LoadReport, LoadedFragments, LoaderError};
pub use symbol::{IndexFragment, IndexHandle, Locator, SymbolEntry, SymbolError, SymbolIndex};
