//! Filter normalization.
//!
//! Turns the raw request surface (comma-separated strings, booleans) into
//! the canonical [`GraphFilters`] the rest of the pipeline runs on.
//! Severity values are validated up front: an unknown severity is rejected
//! with a client-class error rather than silently matching nothing.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::types::{GraphFilters, GraphQuery, Severity};

/// Split a comma-separated list into trimmed, non-empty tokens.
fn split_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Normalize a raw request into the canonical filter set.
///
/// # Errors
///
/// Returns [`Error::InvalidFilter`] if the severity list contains a value
/// outside `fatal`, `critical`, `warning`, `none`.
pub fn normalize(query: &GraphQuery) -> Result<GraphFilters> {
    let mut severities = BTreeSet::new();
    for token in split_list(query.severities.as_deref()) {
        let severity = Severity::parse(&token)
            .ok_or_else(|| Error::InvalidFilter(format!("unknown severity '{token}'")))?;
        severities.insert(severity);
    }

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    Ok(GraphFilters {
        namespaces: split_list(query.namespaces.as_deref()),
        tags: split_list(query.tags.as_deref()),
        severities,
        search,
        include_dependents: query.include_dependents,
        show_full_chain: query.show_full_chain,
    })
}
