use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use docsearch::cli::{Cli, Commands};
use docsearch::commands::{self, IndexSource};
use docsearch::config::Config;
use docsearch::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine project root (current directory)
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = Config::load(&project_root)?;

    // The guard must be held until exit so buffered log lines are flushed
    let _logging_guard = init_logging(&config.logging, &project_root, cli.verbose)?;

    tracing::debug!("Project root: {}", project_root.display());

    let source = IndexSource::resolve(&config, &project_root, cli.dir.as_deref());

    match cli.command {
        Commands::Init { force } => {
            commands::init::run(&project_root, force)?;
        }
        Commands::Query { text, limit, json } => {
            commands::query::run(&source, &config, text.as_deref().unwrap_or(""), limit, json).await?;
        }
        Commands::Show { key, json } => {
            commands::show::run(&source, &key, json).await?;
        }
        Commands::Stats => {
            commands::stats::run(&source).await?;
        }
    }

    Ok(())
}
