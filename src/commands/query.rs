use anyhow::Result;

use super::{format_entry, IndexSource};
use crate::Config;

/// Run the query command
///
/// # Arguments
///
/// * `text` - Symbol prefix to look up
/// * `limit` - Maximum number of results; falls back to `search.default_limit`
/// * `json` - Print the matching entries as a JSON array
pub async fn run(
    source: &IndexSource,
    config: &Config,
    text: &str,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let (index, report) = source.build_index().await?;
    report.print_summary();

    let limit = limit.or(config.search.default_limit);
    let results = index.query(text, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No symbols found for: {}", text);
        return Ok(());
    }

    let total = index.match_count(text);
    if total > results.len() {
        println!("Showing {} of {} symbols for: \"{}\"\n", results.len(), total, text);
    } else {
        println!("Found {} symbols for: \"{}\"\n", results.len(), text);
    }

    for entry in results {
        println!("{}", format_entry(entry));
    }

    Ok(())
}
