use anyhow::{bail, Result};

use super::{format_entry, IndexSource};

/// Run the show command: print the merged entry for one exact key
pub async fn run(source: &IndexSource, key: &str, json: bool) -> Result<()> {
    let (index, report) = source.build_index().await?;
    report.print_summary();

    let Some(entry) = index.exact_match(key) else {
        bail!("No symbol named '{}'", key);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        println!("{}", format_entry(entry));
    }

    Ok(())
}
