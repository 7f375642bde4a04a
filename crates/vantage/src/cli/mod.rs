//! CLI command implementations.

mod display;

pub mod graph;
pub mod ingest;
pub mod stats;
