use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(author, version, about = "Symbol search over generated documentation indexes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Fragment directory (overrides the configured one)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration to .docsearch/config.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// List symbols whose name starts with the given text
    Query {
        /// Symbol prefix; omit to list everything
        text: Option<String>,

        /// Maximum number of results to return
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every documented location of one symbol
    Show {
        /// Symbol name
        key: String,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show index statistics
    Stats,
}
