//! `vantage stats` command implementation.

use std::path::Path;

use colored::Colorize;
use vantage::Vantage;

use super::display::{format_size, stat_line};

/// Run the stats command.
pub fn run(db: &Path) -> Result<(), vantage::Error> {
    let vantage = Vantage::open(db)?;

    let db_size_str = match std::fs::metadata(vantage.db_path()) {
        Ok(meta) => format_size(meta.len()),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to get database file size");
            "size unknown".to_string()
        }
    };

    let stats = vantage.stats()?;

    println!("{}", "Vantage Store Statistics".cyan().bold());
    println!();
    println!(
        "  {}: {} ({})",
        "Database".white().bold(),
        vantage.db_path().display(),
        db_size_str
    );
    println!();
    stat_line("Services", stats.services);
    stat_line("Service dependencies", stats.service_dependencies);
    stat_line("Namespace dependencies", stats.namespace_dependencies);
    stat_line("Firing alerts", stats.firing_alerts);

    Ok(())
}
