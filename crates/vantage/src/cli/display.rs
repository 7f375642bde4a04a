//! Common display utilities for CLI commands.

use colored::Colorize;

/// Print an indented `label: count` line.
pub fn stat_line(label: &str, count: impl std::fmt::Display) {
    println!("  {}: {}", label.white().bold(), count.to_string().green());
}

/// Human-readable file size.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
