//! `vantage graph` command implementation.

use std::path::Path;

use colored::Colorize;
use vantage::{GraphQuery, Vantage};

/// Run the graph command.
///
/// Prints the assembled graph as pretty JSON on stdout; advisory warnings
/// go to stderr so piped output stays machine-readable.
pub fn run(db: &Path, query: &GraphQuery) -> Result<(), vantage::Error> {
    let vantage = Vantage::open(db)?;
    let response = vantage.build_graph(query)?;

    if response.large_result_warning {
        eprintln!(
            "{}: full-chain result is large; consider narrowing the filter",
            "warning".yellow().bold()
        );
    }

    let json = serde_json::to_string_pretty(&response)?;
    println!("{json}");

    Ok(())
}
