//! Stats command for displaying index statistics

use anyhow::Result;

use super::IndexSource;

/// Run the stats command
pub async fn run(source: &IndexSource) -> Result<()> {
    let (index, report) = source.build_index().await?;
    let stats = index.stats();

    println!("Symbol Index Statistics");
    println!("=======================\n");

    println!("Source: {}", source.directory.display());
    println!("  Fragment files loaded:  {}", report.loaded());
    println!("  Fragment files skipped: {}", report.error_count());
    println!();

    println!("Index Contents:");
    println!("  Symbols:          {}", stats.entries);
    println!("  Locations:        {}", stats.targets);
    println!("  Rejected entries: {}", stats.rejected);

    if report.has_errors() {
        println!();
        report.print_summary();
    }

    Ok(())
}
