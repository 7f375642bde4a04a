//! Vantage CLI - Service topology graphs from the command line.
//!
//! Vantage ingests topology snapshots into a `SQLite` store and assembles
//! filtered dependency-graph views for dashboards.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Vantage: Service topology store and dependency graph engine.
#[derive(Parser)]
#[command(name = "vantage")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the topology database
    #[arg(short, long, global = true, default_value = "vantage.db")]
    db: PathBuf,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a topology snapshot (JSON) into the store
    Ingest {
        /// Snapshot file with services, dependencies, and alerts
        file: PathBuf,
    },

    /// Assemble a dependency graph view and print it as JSON
    Graph {
        /// Comma-separated namespace filter
        #[arg(short, long)]
        namespaces: Option<String>,

        /// Comma-separated tag filter (matches services sharing any tag)
        #[arg(short, long)]
        tags: Option<String>,

        /// Comma-separated severity filter (fatal, critical, warning, none)
        #[arg(short, long)]
        severities: Option<String>,

        /// Case-insensitive substring match on namespace or service name
        #[arg(long)]
        search: Option<String>,

        /// Grow the namespace filter by one dependency hop in both directions
        #[arg(short, long)]
        include_dependents: bool,

        /// Show every service transitively connected to the filtered set
        #[arg(short = 'f', long)]
        show_full_chain: bool,
    },

    /// Show store statistics
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the appropriate command
    let result = match cli.command {
        Commands::Ingest { file } => cli::ingest::run(&cli.db, &file),
        Commands::Graph {
            namespaces,
            tags,
            severities,
            search,
            include_dependents,
            show_full_chain,
        } => {
            let query = vantage::GraphQuery {
                namespaces,
                tags,
                severities,
                search,
                include_dependents,
                show_full_chain,
            };
            cli::graph::run(&cli.db, &query)
        }
        Commands::Stats => cli::stats::run(&cli.db),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
