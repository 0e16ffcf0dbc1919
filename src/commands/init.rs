use anyhow::{bail, Result};
use std::path::Path;

use crate::Config;

/// Write the default configuration under `root`
pub fn run(root: &Path, force: bool) -> Result<()> {
    let config_path = Config::config_path(root);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    config.save(root)?;

    println!("Wrote {}", config_path.display());
    println!(
        "Fragments will be read from {}",
        config.index_dir(root).display()
    );

    Ok(())
}
